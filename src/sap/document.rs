use std::fmt;

/// Which attributes a document carries.
///
/// `Basic` covers author, name and date. `Extended` adds the stereo flag and
/// the matching index field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentSchema {
    Basic,
    #[default]
    Extended,
}

impl DocumentSchema {
    pub fn has_stereo(self) -> bool {
        matches!(self, DocumentSchema::Extended)
    }
}

/// Metadata of one SAP module, as handed to the index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SapDocument {
    pub author: String,
    pub name: String,
    /// Year token as found in the header, possibly ending in `?`.
    pub date: String,
    /// `None` when parsed under [`DocumentSchema::Basic`].
    pub stereo: Option<bool>,
}

impl SapDocument {
    /// Numeric year for range queries. An unknown last digit counts as zero,
    /// so `198?` sorts as 1980.
    pub fn year(&self) -> Option<u64> {
        if self.date.is_empty() {
            return None;
        }
        self.date.replace('?', "0").parse().ok()
    }
}

impl fmt::Display for SapDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Author:{},Name:{},Date:{}",
            self.author, self.name, self.date
        )?;
        if let Some(stereo) = self.stereo {
            write!(f, ",Stereo:{}", u8::from(stereo))?;
        }
        f.write_str("]")
    }
}
