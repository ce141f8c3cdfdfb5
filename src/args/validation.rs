use std::{fs, path::PathBuf};

/// # Errors
///
/// Will return `Err` if any of the semicolon-separated files is not readable
pub fn check_readable_file(file: &str) -> Result<String, String> {
    for part in file.split(';').map(str::trim).filter(|f| !f.is_empty()) {
        let path = PathBuf::from(part);
        if !path.is_file() || fs::metadata(&path).is_err() {
            return Err(format!("The sql startup script '{part}' is not readable."));
        }
    }
    Ok(file.to_string())
}

/// # Errors
///
/// Will return `Err` if the value is not a plausible season start year
pub fn check_season_year(value: &str) -> Result<i32, String> {
    let year: i32 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a year."))?;
    if (1950..=2100).contains(&year) {
        Ok(year)
    } else {
        Err(format!("Season year {year} is out of range."))
    }
}

/// # Errors
///
/// Will return `Err` if the page size is zero or above what the feeds allow
pub fn check_page_size(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(n) if (1..=1000).contains(&n) => Ok(n),
        _ => Err(format!("Page size '{value}' must be between 1 and 1000.")),
    }
}
