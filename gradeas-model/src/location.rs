//! A content item's position in a course hierarchy.
//!
//! Locations are written either as a bare path, `org/course/category/name`, or with a scheme tag in
//! front, `i4x://org/course/category/name`. The tag defaults to `i4x` and never shows up in URL
//! paths built from a location.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, bail, ensure};
use itertools::Itertools;
use serde::{Deserialize, Serialize, Serializer};

use crate::paths::{DEFAULT_TAG, TAG_SEPARATOR};

#[derive(Debug, Clone, Hash, PartialEq, Eq, Deserialize)]
#[serde(try_from = "LocationRepr")]
pub struct Location {
    tag: String,
    org: String,
    course: String,
    category: String,
    name: String,
}

impl Location {
    /// Builds a location from its parts. Fails unless every part is non-empty and free of `/`, so
    /// that the location survives a trip through its canonical string.
    pub fn new(
        tag: Option<String>,
        org: String,
        course: String,
        category: String,
        name: String,
    ) -> Result<Self> {
        let location = Self {
            tag: tag.unwrap_or_else(|| DEFAULT_TAG.to_owned()),
            org,
            course,
            category,
            name,
        };
        location.validate()?;
        Ok(location)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            is_segment(&self.tag),
            "location `{self}` has an invalid tag `{}`",
            self.tag
        );
        if let Some(field) = self.fields().into_iter().find(|field| !is_segment(field)) {
            bail!("location `{self}` has an invalid field `{field}`");
        }
        Ok(())
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn course(&self) -> &str {
        &self.course
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The path fields in order: org, course, category, name.
    pub fn fields(&self) -> [&str; 4] {
        [&self.org, &self.course, &self.category, &self.name]
    }
}

impl FromStr for Location {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (tag, path) = match s.split_once(TAG_SEPARATOR) {
            Some((tag, path)) => (Some(tag), path),
            None => (None, s),
        };

        let path = path.strip_prefix('/').unwrap_or(path);
        let path = path.strip_suffix('/').unwrap_or(path);

        let (org, course, category, name) = path.split('/').collect_tuple().with_context(|| {
            format!("location `{s}` must have exactly four fields: org/course/category/name")
        })?;

        Self::new(
            tag.map(ToOwned::to_owned),
            org.to_owned(),
            course.to_owned(),
            category.to_owned(),
            name.to_owned(),
        )
        .with_context(|| format!("could not parse location `{s}`"))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{TAG_SEPARATOR}{}",
            self.tag,
            self.fields().iter().format("/")
        )
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The shapes a location is accepted in when deserializing.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LocationRepr {
    Url(String),
    Parts(String, String, String, String, String),
    Fields {
        #[serde(default)]
        tag: Option<String>,
        org: String,
        course: String,
        category: String,
        name: String,
    },
}

impl TryFrom<LocationRepr> for Location {
    type Error = anyhow::Error;

    fn try_from(repr: LocationRepr) -> Result<Self> {
        match repr {
            LocationRepr::Url(url) => url.parse(),
            LocationRepr::Parts(tag, org, course, category, name) => {
                Self::new(Some(tag), org, course, category, name)
            }
            LocationRepr::Fields {
                tag,
                org,
                course,
                category,
                name,
            } => Self::new(tag, org, course, category, name),
        }
    }
}

fn is_segment(part: &str) -> bool {
    !part.is_empty() && !part.contains('/')
}
