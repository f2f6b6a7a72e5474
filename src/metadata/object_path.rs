// src/metadata/object_path.rs
use crate::error::{TdmsError, Result};
use std::fmt;

/// Represents an object path in the TDMS hierarchy
///
/// Paths are rendered the way TDMS stores them: `/` for the file object,
/// `/'group'` for a group and `/'group'/'channel'` for a channel, with any
/// single quote inside a name doubled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectPath {
    Root,
    Group(String),
    Channel { group: String, channel: String },
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectPath::Root => write!(f, "/"),
            ObjectPath::Group(name) => write!(f, "/'{}'", name.replace('\'', "''")),
            ObjectPath::Channel { group, channel } => {
                let escaped_group = group.replace('\'', "''");
                let escaped_channel = channel.replace('\'', "''");
                write!(f, "/'{}'/'{}'", escaped_group, escaped_channel)
            }
        }
    }
}

impl ObjectPath {
    pub fn channel(group: impl Into<String>, channel: impl Into<String>) -> Self {
        ObjectPath::Channel { group: group.into(), channel: channel.into() }
    }

    pub fn from_string(s: &str) -> Result<Self> {
        if s == "/" {
            return Ok(ObjectPath::Root);
        }

        let invalid = || TdmsError::InvalidPath(s.to_string());
        let mut components: Vec<String> = Vec::with_capacity(2);
        let mut chars = s.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '/' || chars.next() != Some('\'') {
                return Err(invalid());
            }

            let mut name = String::new();
            loop {
                match chars.next() {
                    Some('\'') if chars.peek() == Some(&'\'') => {
                        chars.next();
                        name.push('\'');
                    }
                    Some('\'') => break,
                    Some(ch) => name.push(ch),
                    None => return Err(invalid()),
                }
            }
            components.push(name);
        }

        let mut components = components.into_iter();
        match (components.next(), components.next(), components.next()) {
            (Some(group), None, None) => Ok(ObjectPath::Group(group)),
            (Some(group), Some(channel), None) => Ok(ObjectPath::Channel { group, channel }),
            _ => Err(invalid()),
        }
    }

    /// Group name for group and channel paths
    pub fn group(&self) -> Option<&str> {
        match self {
            ObjectPath::Root => None,
            ObjectPath::Group(name) => Some(name),
            ObjectPath::Channel { group, .. } => Some(group),
        }
    }

    /// Leaf name of the object, without path decoration
    pub fn name(&self) -> Option<&str> {
        match self {
            ObjectPath::Root => None,
            ObjectPath::Group(name) => Some(name),
            ObjectPath::Channel { channel, .. } => Some(channel),
        }
    }

    pub fn is_channel(&self) -> bool {
        matches!(self, ObjectPath::Channel { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_path_formatting() {
        assert_eq!(ObjectPath::Root.to_string(), "/");
        assert_eq!(ObjectPath::Group("MyGroup".into()).to_string(), "/'MyGroup'");
        assert_eq!(
            ObjectPath::channel("Group1", "Channel1").to_string(),
            "/'Group1'/'Channel1'"
        );
        assert_eq!(
            ObjectPath::channel("it's", "a/b").to_string(),
            "/'it''s'/'a/b'"
        );
    }

    #[test]
    fn test_object_path_parsing() {
        assert_eq!(ObjectPath::from_string("/").unwrap(), ObjectPath::Root);
        assert_eq!(
            ObjectPath::from_string("/'acceleration'").unwrap(),
            ObjectPath::Group("acceleration".into())
        );
        assert_eq!(
            ObjectPath::from_string("/'ambient'/'temperature air'").unwrap(),
            ObjectPath::channel("ambient", "temperature air")
        );
        assert_eq!(
            ObjectPath::from_string("/'it''s'/'a/b'").unwrap(),
            ObjectPath::channel("it's", "a/b")
        );
    }

    #[test]
    fn test_object_path_rejects_malformed() {
        for bad in ["", "group", "/group", "/'open", "/'a'/'b'/'c'", "/'a'x"] {
            assert!(ObjectPath::from_string(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_leaf_names() {
        let path = ObjectPath::channel("acceleration", "TP_ACC_LAT19_315deg_X");
        assert_eq!(path.group(), Some("acceleration"));
        assert_eq!(path.name(), Some("TP_ACC_LAT19_315deg_X"));
        assert!(path.is_channel());
        assert_eq!(ObjectPath::Root.name(), None);
    }
}
