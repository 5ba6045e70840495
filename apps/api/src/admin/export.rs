use anyhow::{Context, Result};
use csv::Writer;
use sqlx::PgPool;

use crate::models::user::UserExportRow;

pub const EXPORT_HEADER: [&str; 5] = ["email", "full_name", "plan", "created_at", "analysis_count"];

pub async fn load_export_rows(pool: &PgPool) -> Result<Vec<UserExportRow>, sqlx::Error> {
    sqlx::query_as::<_, UserExportRow>(
        r#"
        SELECT u.email, u.full_name, u.plan, u.created_at, COUNT(a.id) AS analysis_count
        FROM users u
        LEFT JOIN resume_analyses a ON a.user_id = u.id
        GROUP BY u.id, u.email, u.full_name, u.plan, u.created_at
        ORDER BY u.created_at
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Renders the export. Fields with commas, quotes or newlines are quoted.
pub fn write_users_csv(rows: &[UserExportRow]) -> Result<String> {
    let mut wtr = Writer::from_writer(Vec::new());
    wtr.write_record(EXPORT_HEADER)?;
    for row in rows {
        wtr.write_record([
            row.email.as_str(),
            row.full_name.as_deref().unwrap_or(""),
            row.plan.as_str(),
            row.created_at.to_rfc3339().as_str(),
            row.analysis_count.to_string().as_str(),
        ])?;
    }
    let bytes = wtr.into_inner().context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn row(email: &str, name: Option<&str>, count: i64) -> UserExportRow {
        UserExportRow {
            email: email.to_string(),
            full_name: name.map(String::from),
            plan: "pro".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            analysis_count: count,
        }
    }

    #[test]
    fn test_header_and_first_row() {
        let csv = write_users_csv(&[row("a@x.com", Some("A B"), 3)]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("email,full_name,plan,created_at,analysis_count"));
        let first = lines.next().unwrap();
        assert!(first.starts_with("a@x.com,A B,"));
        assert!(first.ends_with(",3"));
    }

    #[test]
    fn test_fields_with_commas_and_quotes_are_quoted() {
        let csv = write_users_csv(&[row("b@x.com", Some("Doe, \"JD\" Jane"), 0)]).unwrap();
        let data = csv.lines().nth(1).unwrap();
        assert!(data.starts_with("b@x.com,\"Doe, \"\"JD\"\" Jane\",pro,"));
    }

    #[test]
    fn test_missing_name_is_empty_field() {
        let csv = write_users_csv(&[row("c@x.com", None, 1)]).unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("c@x.com,,pro,"));
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let csv = write_users_csv(&[]).unwrap();
        assert_eq!(csv, "email,full_name,plan,created_at,analysis_count\n");
    }
}
