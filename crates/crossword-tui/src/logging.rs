use log::LevelFilter;
use std::path::PathBuf;

const LOG_FILE: &str = "crossword.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Where log records go; the terminal itself belongs to the TUI
pub fn log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOG_FILE)
}

/// Route `log` records at `level` and above to the log file
pub fn init(level: LevelFilter) -> Result<PathBuf, fern::InitError> {
    let path = log_path();

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {:<5} [{}] {}",
                chrono::Local::now().format(TIMESTAMP_FORMAT),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(fern::log_file(&path)?)
        .apply()?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn test_log_path_file_name() {
        assert_eq!(log_path().file_name().unwrap(), LOG_FILE);
    }

    #[test]
    fn test_timestamp_format_round_trips() {
        let stamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        assert_eq!(stamp.len(), "2024-01-01 00:00:00".len());
        assert!(NaiveDateTime::parse_from_str(&stamp, TIMESTAMP_FORMAT).is_ok());
    }
}
