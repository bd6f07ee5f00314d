use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating region codes (province or district)
    /// ASCII letters and digits in hyphen-separated segments
    /// - Valid: "SEOUL", "Gyeonggi-DO", "SEOUL-GANGNAM", "Jeju-JejuSi"
    /// - Invalid: "", "-SEOUL", "SEOUL-", "SEOUL--MAPO", "서울", "SEOUL MAPO"
    pub static ref REGION_CODE_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*$").unwrap();
}
