/// Returns true when `e` is a violation of the `short_links.code` uniqueness
/// constraint.
///
/// SQLite reports no constraint name, so the failing column is read from the
/// message (`UNIQUE constraint failed: short_links.code`).
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.message().contains("short_links.code")
}
