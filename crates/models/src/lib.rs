pub mod errors;
pub mod db;
pub mod validate;
pub mod case_progress;
pub mod case_progress_detail;
pub mod merchant;
pub mod lawyer;

/// Current unix time in seconds, the unit of every `*_on` / `*_time` column.
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests;
