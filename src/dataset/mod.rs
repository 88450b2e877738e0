//! Dataset Provider
//!
//! Supplies the immutable country/year table that drives every non-live
//! chart and the table view. The bundled Gapminder sample is compiled into
//! the binary; a CSV file with the same header can be used instead.
//!
//! A dataset is loaded once at startup and shared read-only behind an `Arc`.
//! Any load failure is returned to the caller, which treats it as fatal.

mod error;
mod types;

pub use error::{DatasetError, DatasetResult};
pub use types::Row;

use std::path::{Path, PathBuf};

/// Bundled Gapminder sample
const EMBEDDED_CSV: &str = include_str!("../../data/gapminder.csv");

/// Where the dataset is read from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DatasetSource {
    /// The sample compiled into the binary
    #[default]
    Embedded,
    /// A CSV file on disk
    File(PathBuf),
}

impl DatasetSource {
    /// File source if a path is given, embedded otherwise
    pub fn from_path(path: Option<impl Into<PathBuf>>) -> Self {
        path.map(|p| Self::File(p.into())).unwrap_or_default()
    }
}

/// Immutable in-memory table
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Vec<Row>,
    countries: Vec<String>,
}

impl Dataset {
    /// Load the dataset from a source
    pub fn load(source: &DatasetSource) -> DatasetResult<Self> {
        match source {
            DatasetSource::Embedded => Self::from_csv(EMBEDDED_CSV.as_bytes()),
            DatasetSource::File(path) => Self::from_file(path),
        }
    }

    /// Load the bundled sample
    pub fn embedded() -> DatasetResult<Self> {
        Self::load(&DatasetSource::Embedded)
    }

    fn from_file(path: &Path) -> DatasetResult<Self> {
        let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_csv(file)?;
        tracing::debug!(path = ?path, rows = dataset.len(), "Loaded dataset file");
        Ok(dataset)
    }

    /// Parse CSV records with a header row
    pub fn from_csv<R: std::io::Read>(reader: R) -> DatasetResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut rows = Vec::new();
        for (idx, record) in csv_reader.deserialize::<Row>().enumerate() {
            let row = record?;
            // header is line 1
            validate_row(&row, idx + 2)?;
            rows.push(row);
        }

        Self::from_rows(rows)
    }

    /// Build a dataset from already parsed rows
    pub fn from_rows(rows: Vec<Row>) -> DatasetResult<Self> {
        if rows.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut countries: Vec<String> = Vec::new();
        for row in &rows {
            if !countries.iter().any(|c| c == &row.country) {
                countries.push(row.country.clone());
            }
        }

        Ok(Self { rows, countries })
    }

    /// All rows in source order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false for a loaded dataset
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct country names in order of first appearance
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Whether any row belongs to `country`
    pub fn contains_country(&self, country: &str) -> bool {
        self.countries.iter().any(|c| c == country)
    }

    /// Rows of one country, in source order. Empty for unknown countries.
    pub fn rows_for<'a>(&'a self, country: &'a str) -> impl Iterator<Item = &'a Row> + 'a {
        self.rows.iter().filter(move |row| row.country == country)
    }
}

fn validate_row(row: &Row, line: usize) -> DatasetResult<()> {
    if row.country.is_empty() {
        return Err(DatasetError::InvalidRow {
            line,
            reason: "country is empty".to_string(),
        });
    }
    if !row.gdp_per_capita.is_finite() || row.gdp_per_capita < 0.0 {
        return Err(DatasetError::InvalidRow {
            line,
            reason: format!("gdpPercap out of range: {}", row.gdp_per_capita),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SMALL: &str = "country,continent,year,lifeExp,pop,gdpPercap\n\
        India,Asia,1952,37.373,372000000,546.5657\n\
        India,Asia,1957,40.249,409000000,590.0620\n\
        Kenya,Africa,1952,42.27,6464046,853.5409\n";

    #[test]
    fn test_embedded_dataset_loads() {
        let dataset = Dataset::embedded().unwrap();
        assert!(!dataset.is_empty());
        assert!(dataset.contains_country("India"));
        assert_eq!(dataset.rows_for("India").count(), 12);
    }

    #[test]
    fn test_countries_are_distinct_in_first_appearance_order() {
        let dataset = Dataset::from_csv(SMALL.as_bytes()).unwrap();
        assert_eq!(dataset.countries(), &["India".to_string(), "Kenya".to_string()]);
    }

    #[test]
    fn test_rows_for_unknown_country_is_empty() {
        let dataset = Dataset::from_csv(SMALL.as_bytes()).unwrap();
        assert_eq!(dataset.rows_for("Atlantis").count(), 0);
    }

    #[test]
    fn test_rows_parse_renamed_columns() {
        let dataset = Dataset::from_csv(SMALL.as_bytes()).unwrap();
        let first = &dataset.rows()[0];
        assert_eq!(first.year, 1952);
        assert_eq!(first.population, 372_000_000);
        assert!((first.gdp_per_capita - 546.5657).abs() < 1e-3);
        assert!((first.life_expectancy - 37.373).abs() < 1e-3);
    }

    #[test]
    fn test_header_only_is_empty_error() {
        let result = Dataset::from_csv("country,continent,year,lifeExp,pop,gdpPercap\n".as_bytes());
        assert!(matches!(result, Err(DatasetError::Empty)));
    }

    #[test]
    fn test_malformed_record_is_error() {
        let csv = "country,continent,year,lifeExp,pop,gdpPercap\nIndia,Asia,soon,1,2,3\n";
        assert!(matches!(
            Dataset::from_csv(csv.as_bytes()),
            Err(DatasetError::Csv(_))
        ));
    }

    #[test]
    fn test_negative_gdp_is_rejected() {
        let csv = "country,continent,year,lifeExp,pop,gdpPercap\nIndia,Asia,1952,1,2,-3\n";
        match Dataset::from_csv(csv.as_bytes()) {
            Err(DatasetError::InvalidRow { line, .. }) => assert_eq!(line, 2),
            other => panic!("Expected InvalidRow, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SMALL.as_bytes()).unwrap();

        let source = DatasetSource::from_path(Some(file.path()));
        let dataset = Dataset::load(&source).unwrap();
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = DatasetSource::File(PathBuf::from("/nonexistent/gapminder.csv"));
        assert!(matches!(Dataset::load(&source), Err(DatasetError::Io { .. })));
    }
}
