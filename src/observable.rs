use crate::error::{HeredityError, Result};
use csv;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One row of a pedigree table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub mother: Option<String>,
    pub father: Option<String>,
    /// Observed trait status, `None` when unrecorded
    pub evidence: Option<bool>,
}

impl Record {
    /// A founder with no recorded trait.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }

    pub fn parents(mut self, mother: &str, father: &str) -> Self {
        self.mother = Some(mother.to_owned());
        self.father = Some(father.to_owned());
        self
    }

    pub fn evidence(mut self, has_trait: bool) -> Self {
        self.evidence = Some(has_trait);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Field {
    Name,
    Mother,
    Father,
    Trait,
    Ignored,
}

const COLUMNS: [(&str, Field); 4] = [
    ("name", Field::Name),
    ("mother", Field::Mother),
    ("father", Field::Father),
    ("trait", Field::Trait),
];

/// Produces pedigree `Record`s from delimited data
///
/// `Csv` implements Iterator so it can be passed
/// directly to `Pedigree::from_records()`
pub struct Csv {
    records: csv::StringRecordsIntoIter<Box<dyn Read>>,
    fields: Vec<Field>,
    present: String,
    absent: String,
}

impl Csv {
    fn record(&self, row: &csv::StringRecord) -> Result<Record> {
        let mut record = Record::default();
        for (field, value) in self.fields.iter().zip(row.iter()) {
            match field {
                Field::Name => record.name = value.to_owned(),
                Field::Mother => record.mother = non_empty(value),
                Field::Father => record.father = non_empty(value),
                Field::Trait => {
                    record.evidence = if value == self.present {
                        Some(true)
                    } else if value == self.absent {
                        Some(false)
                    } else {
                        None
                    }
                }
                Field::Ignored => {}
            }
        }

        if record.name.is_empty() {
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            return Err(HeredityError::Load(format!("record on line {} has no name", line)));
        }
        Ok(record)
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}

impl Iterator for Csv {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Result<Record>> {
        let row = self.records.next()?;
        Some(row.map_err(HeredityError::from).and_then(|row| self.record(&row)))
    }
}

pub struct CsvBuilder {
    headers: bool,
    delimiter: u8,
    present: String,
    absent: String,
}

impl Default for CsvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvBuilder {
    /// Construct a new Csv builder
    ///
    /// Defaults to comma separated data with a header row and
    /// `1`/`0` as the trait sentinels.
    pub fn new() -> Self {
        Self {
            headers: true,
            delimiter: b',',
            present: "1".to_owned(),
            absent: "0".to_owned(),
        }
    }

    /// Without headers, columns are read as name, mother, father, trait.
    pub fn headers(&mut self, headers: bool) -> &mut Self {
        self.headers = headers;
        self
    }

    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    /// Values of the trait column meaning expressed and not expressed.
    /// Any other value leaves the trait unrecorded.
    pub fn trait_sentinels(&mut self, present: &str, absent: &str) -> &mut Self {
        self.present = present.to_owned();
        self.absent = absent.to_owned();
        self
    }

    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Csv> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| HeredityError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.from_reader(Box::new(file))
    }

    pub fn from_reader(&self, reader: Box<dyn Read>) -> Result<Csv> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(self.headers)
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let fields = if self.headers {
            let fields: Vec<Field> = rdr
                .headers()?
                .iter()
                .map(|s| {
                    COLUMNS
                        .iter()
                        .find(|(column, _)| *column == s)
                        .map(|(_, field)| *field)
                        .unwrap_or(Field::Ignored)
                })
                .collect();
            for (column, field) in COLUMNS.iter() {
                if !fields.contains(field) {
                    return Err(HeredityError::Load(format!("missing column '{}'", column)));
                }
            }
            fields
        } else {
            COLUMNS.iter().map(|(_, field)| *field).collect()
        };

        Ok(Csv {
            records: rdr.into_records(),
            fields,
            present: self.present.clone(),
            absent: self.absent.clone(),
        })
    }
}
