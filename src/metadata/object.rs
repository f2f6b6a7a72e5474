// src/metadata/object.rs
use crate::types::{Property, PropertyValue};
use crate::metadata::ObjectPath;
use crate::raw_data::RawDataBuffer;

/// An object descriptor to be written as part of one segment
///
/// A segment is an ordered list of these: the file object, group objects and
/// channel objects, each carrying its property bag and, for channels, the raw
/// data attached to that segment.
#[derive(Debug)]
pub struct TdmsObject {
    pub path: ObjectPath,
    pub properties: Vec<Property>,
    pub data: Option<RawDataBuffer>,
}

impl TdmsObject {
    /// The file-level object
    pub fn root(properties: Vec<Property>) -> Self {
        TdmsObject { path: ObjectPath::Root, properties, data: None }
    }

    pub fn group(name: impl Into<String>) -> Self {
        TdmsObject { path: ObjectPath::Group(name.into()), properties: Vec::new(), data: None }
    }

    /// A channel object with its data for this segment
    pub fn channel(
        group: impl Into<String>,
        channel: impl Into<String>,
        data: RawDataBuffer,
        properties: Vec<Property>,
    ) -> Self {
        TdmsObject {
            path: ObjectPath::channel(group, channel),
            properties,
            data: Some(data),
        }
    }

    /// Append or replace a property, keeping insertion order
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        let property = Property::new(name, value);
        match self.properties.iter_mut().find(|p| p.name == property.name) {
            Some(existing) => existing.value = property.value,
            None => self.properties.push(property),
        }
        self
    }

    /// Raw data carried by this object, if any values were attached
    pub fn raw_data(&self) -> Option<&RawDataBuffer> {
        self.data.as_ref().filter(|buffer| buffer.value_count() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataType;

    #[test]
    fn test_channel_object() {
        let mut buffer = RawDataBuffer::new(DataType::SingleFloat);
        buffer.write_slice(&[1.0f32, 2.0, 3.0]).unwrap();

        let object = TdmsObject::channel("acceleration", "x", buffer, Vec::new())
            .with_property("unit_string", "g")
            .with_property("wf_increment", 0.004);

        assert_eq!(object.path.to_string(), "/'acceleration'/'x'");
        assert_eq!(object.properties.len(), 2);
        assert_eq!(object.properties[0].name, "unit_string");
        assert_eq!(object.raw_data().unwrap().value_count(), 3);
    }

    #[test]
    fn test_property_replacement_keeps_order() {
        let object = TdmsObject::root(Vec::new())
            .with_property("author", "a")
            .with_property("datestring", "d")
            .with_property("author", "b");

        let names: Vec<&str> = object.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["author", "datestring"]);
        assert_eq!(object.properties[0].value, PropertyValue::String("b".into()));
    }

    #[test]
    fn test_empty_data_is_not_raw_data() {
        let object = TdmsObject::channel("g", "c", RawDataBuffer::new(DataType::F32), Vec::new());
        assert!(object.raw_data().is_none());
        assert!(TdmsObject::group("g").raw_data().is_none());
    }
}
