/// Schema metadata for PostgreSQL tables.
///
/// Provides compile-time SQL generation for table creation.
/// All methods return `&'static str` so statements can be assembled with
/// `const_format::concatcp!`.
///
/// This trait contains no I/O operations; it purely describes table
/// structure. [`crate::migrate`] applies it.
pub trait Schema {
    /// Returns the table name in the database.
    fn name() -> &'static str;
    /// Returns `CREATE TABLE IF NOT EXISTS` DDL statement.
    fn creates() -> &'static str;
}
