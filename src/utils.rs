/// Shared utility functions for the temperature tracker
///
/// Extract the numeric station ID from a lieuhelper lookup response.
///
/// The station search endpoint answers with a pipe-delimited record like
/// `7156|Paris-Montsouris (75)|0|75|0|1716185221`; the station ID is the
/// first field. This function takes everything before the first `|` and
/// validates that it is a non-empty run of digits.
///
/// # Examples
///
/// ```
/// use meteo_temp_tracker::utils::extract_station_id;
///
/// assert_eq!(
///     extract_station_id("7156|Paris-Montsouris (75)|0|75|0|1716185221").unwrap(),
///     "7156"
/// );
/// assert_eq!(extract_station_id("615|Bressuire (79)|0|79|0").unwrap(), "615");
/// ```
pub fn extract_station_id(value: &str) -> Result<String, &'static str> {
    let first_field = match value.split_once('|') {
        Some((id, _)) => id,
        None => value,
    };

    let id = first_field.trim();
    if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
        return Ok(id.to_string());
    }

    Err("No numeric station ID in lookup response")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_station_id_full_record() {
        assert_eq!(
            extract_station_id("7156|Paris-Montsouris (75)|0|75|0|1716185221").unwrap(),
            "7156"
        );
    }

    #[test]
    fn test_extract_station_id_short_record() {
        assert_eq!(extract_station_id("615|Bressuire (79)|0|79|0").unwrap(), "615");
    }

    #[test]
    fn test_extract_station_id_bare_id() {
        assert_eq!(extract_station_id("10637").unwrap(), "10637");
    }

    #[test]
    fn test_extract_station_id_whitespace() {
        assert_eq!(extract_station_id(" 7156 |Paris").unwrap(), "7156");
    }

    #[test]
    fn test_extract_station_id_empty() {
        assert!(extract_station_id("").is_err());
    }

    #[test]
    fn test_extract_station_id_empty_first_field() {
        assert!(extract_station_id("|Paris-Montsouris (75)").is_err());
    }

    #[test]
    fn test_extract_station_id_non_numeric() {
        assert!(extract_station_id("Paris|7156").is_err());
    }
}
