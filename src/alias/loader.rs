use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use super::error::{AliasError, AliasResult};

/// Lower-cases and trims an alias key.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).trim(csv::Trim::All).flexible(true);
    builder
}

fn column(
    headers: &csv::StringRecord,
    name: &'static str,
    path: &Path,
) -> AliasResult<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| AliasError::MissingColumn {
            path: path.to_path_buf(),
            column: name,
        })
}

fn read_error(path: &Path) -> impl Fn(csv::Error) -> AliasError + '_ {
    move |source| AliasError::Read {
        path: path.to_path_buf(),
        source,
    }
}

/// Reads a `name,replacement` table. `origin` is only used in errors.
pub fn read_substitutions<R: Read>(reader: R, origin: &Path) -> AliasResult<HashMap<String, String>> {
    let mut rows = reader_builder().from_reader(reader);
    let headers = rows.headers().map_err(read_error(origin))?.clone();
    let name_col = column(&headers, "name", origin)?;
    let replacement_col = column(&headers, "replacement", origin)?;

    let mut table = HashMap::new();
    for row in rows.records() {
        let row = row.map_err(read_error(origin))?;
        let (Some(name), Some(replacement)) = (row.get(name_col), row.get(replacement_col)) else {
            continue;
        };
        if name.is_empty() || replacement.is_empty() {
            continue;
        }
        table.insert(normalize_key(name), replacement.to_string());
    }

    Ok(table)
}

/// Reads a `Country,Adjectival,Demonym` table; both lists are comma-separated.
pub fn read_demonyms<R: Read>(reader: R, origin: &Path) -> AliasResult<HashMap<String, String>> {
    let mut rows = reader_builder().from_reader(reader);
    let headers = rows.headers().map_err(read_error(origin))?.clone();
    let country_col = column(&headers, "Country", origin)?;
    let adjectival_col = column(&headers, "Adjectival", origin)?;
    let demonym_col = column(&headers, "Demonym", origin)?;

    let mut table = HashMap::new();
    for row in rows.records() {
        let row = row.map_err(read_error(origin))?;
        let Some(country) = row.get(country_col).filter(|c| !c.is_empty()) else {
            continue;
        };

        let forms = [adjectival_col, demonym_col]
            .into_iter()
            .filter_map(|col| row.get(col))
            .flat_map(|list| list.split(','))
            .map(normalize_key)
            .filter(|form| !form.is_empty());

        for form in forms {
            table.entry(form).or_insert_with(|| country.to_string());
        }
    }

    Ok(table)
}

pub fn load_substitutions(path: &Path) -> AliasResult<HashMap<String, String>> {
    let file = std::fs::File::open(path).map_err(|e| AliasError::Read {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    non_empty(read_substitutions(file, path)?, path)
}

pub fn load_demonyms(path: &Path) -> AliasResult<HashMap<String, String>> {
    let file = std::fs::File::open(path).map_err(|e| AliasError::Read {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    non_empty(read_demonyms(file, path)?, path)
}

fn non_empty(table: HashMap<String, String>, path: &Path) -> AliasResult<HashMap<String, String>> {
    if table.is_empty() {
        return Err(AliasError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(table)
}
