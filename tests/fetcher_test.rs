// Tests for ObservationFetcher and StationLocator against a mock server
// Uses mockito for HTTP mocking

use chrono::{NaiveDate, NaiveTime};
use mockito::Server;

use meteo_temp_tracker::fetch_error::FetchError;
use meteo_temp_tracker::fetcher::{ObservationFetcher, ObservationSource};
use meteo_temp_tracker::station_locator::StationLocator;

const DAY_PAGE: &str = r#"
<html>
<body>
<div>navigation</div>
<p>Observations de Bressuire</p>
<table width="100%">
  <tbody>
    <tr><td>Heure<br/>locale</td><td>Temps</td><td>Temp&eacute;rature</td><td>Vent</td></tr>
    <tr><td>0h00</td><td></td><td>8.4 &deg;C</td><td>5 km/h</td></tr>
    <tr><td>6h00</td><td></td><td>6,9 &deg;C</td><td>3 km/h</td></tr>
    <tr><td>12h00</td><td></td><td>14.2 &deg;C</td><td>10 km/h</td></tr>
  </tbody>
</table>
</body>
</html>
"#;

#[tokio::test]
async fn test_fetch_day_parses_observation_table() {
    let mut server = Server::new_async().await;

    // 2024-03-01 is addressed with a zero-based month (mois2=2)
    let mock = server
        .mock(
            "GET",
            "/temps-reel/obs_villes.php?code2=7156&jour2=1&mois2=2&annee2=2024&affint=1",
        )
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(DAY_PAGE)
        .create_async()
        .await;

    let fetcher = ObservationFetcher::with_base_url(server.url());
    let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let observations = fetcher.fetch_day("7156", day).await.unwrap();

    assert_eq!(observations.len(), 3);
    assert_eq!(observations[0].station_id, "7156");
    assert_eq!(
        observations[0].timestamp,
        day.and_time(NaiveTime::from_hms_opt(0, 0, 0).unwrap())
    );
    assert_eq!(observations[0].temperature, 8.4);
    assert_eq!(observations[1].temperature, 6.9);
    assert_eq!(observations[2].temperature, 14.2);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_day_without_table_is_empty() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock(
            "GET",
            "/temps-reel/obs_villes.php?code2=7156&jour2=15&mois2=0&annee2=2024&affint=1",
        )
        .with_status(200)
        .with_body("<html><body><p>Pas de donn&eacute;es</p></body></html>")
        .create_async()
        .await;

    let fetcher = ObservationFetcher::with_base_url(server.url());
    let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let observations = fetcher.fetch_day("7156", day).await.unwrap();

    assert!(observations.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_day_server_error() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock(
            "GET",
            "/temps-reel/obs_villes.php?code2=7156&jour2=1&mois2=2&annee2=2024&affint=1",
        )
        .with_status(500)
        .create_async()
        .await;

    let fetcher = ObservationFetcher::with_base_url(server.url());
    let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let result = fetcher.fetch_day("7156", day).await;

    assert!(matches!(result, Err(FetchError::Request(_))));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_find_station_id() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock(
            "GET",
            "/temps-reel/lieuhelper.php?mode=findstation&str=Bressuire",
        )
        .with_status(200)
        .with_body("615|Bressuire (79)|0|79|0|1716185221")
        .create_async()
        .await;

    let locator = StationLocator::with_base_url(server.url());
    let station_id = locator.find_station_id("Bressuire").await.unwrap();

    assert_eq!(station_id, "615");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_find_station_id_unknown_station() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock(
            "GET",
            "/temps-reel/lieuhelper.php?mode=findstation&str=Nowhere",
        )
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    let locator = StationLocator::with_base_url(server.url());
    let result = locator.find_station_id("Nowhere").await;

    assert!(matches!(result, Err(FetchError::ParseError)));
    mock.assert_async().await;
}
