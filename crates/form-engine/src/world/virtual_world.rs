//! In-memory implementation of the Typst `World` trait

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Timelike, Utc};
use typst::diag::{FileError, FileResult};
use typst::foundations::{Array, Bytes, Datetime, Dict, Value};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, World};

use super::fonts::{global_font_cache, FontCache};
use super::virtual_fs::VirtualFilesystem;
use crate::compiler::errors::EngineError;

/// A world holding one form template, its inputs and its images
pub struct VirtualWorld {
    filesystem: VirtualFilesystem,
    font_cache: &'static FontCache,
    /// Accessible as `sys.inputs` in Typst
    inputs: Dict,
    /// Fixed for the lifetime of the world so `datetime.today()` is stable
    time: DateTime<Utc>,
    library: LazyHash<Library>,
    main: FileId,
}

impl VirtualWorld {
    /// Create a world from template source, JSON inputs and assets keyed by virtual path
    pub fn new(
        source: String,
        inputs: HashMap<String, serde_json::Value>,
        assets: HashMap<String, Bytes>,
    ) -> Result<Self, EngineError> {
        let mut filesystem = VirtualFilesystem::new();
        let main = filesystem.mount_main(source);

        for (path, content) in assets {
            filesystem.mount_file(&path, content)?;
        }

        let inputs = convert_inputs(inputs)?;
        let library = Library::builder().with_inputs(inputs.clone()).build();

        Ok(Self {
            filesystem,
            font_cache: global_font_cache(),
            inputs,
            time: Utc::now(),
            library: LazyHash::new(library),
            main,
        })
    }

    pub fn inputs(&self) -> &Dict {
        &self.inputs
    }

    pub fn filesystem(&self) -> &VirtualFilesystem {
        &self.filesystem
    }
}

fn convert_inputs(inputs: HashMap<String, serde_json::Value>) -> Result<Dict, EngineError> {
    let mut dict = Dict::new();
    for (key, value) in inputs {
        dict.insert(key.into(), json_to_typst_value(&value)?);
    }
    Ok(dict)
}

/// Convert a JSON value to a Typst value
pub fn json_to_typst_value(json: &serde_json::Value) -> Result<Value, EngineError> {
    match json {
        serde_json::Value::Null => Ok(Value::None),
        serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float(f))
            } else {
                Err(EngineError::InvalidArgument(format!("Invalid number: {}", n)))
            }
        }
        serde_json::Value::String(s) => Ok(Value::Str(s.as_str().into())),
        serde_json::Value::Array(arr) => {
            let items = arr
                .iter()
                .map(json_to_typst_value)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Array(Array::from(items.as_slice())))
        }
        serde_json::Value::Object(obj) => {
            let mut dict = Dict::new();
            for (k, v) in obj {
                dict.insert(k.as_str().into(), json_to_typst_value(v)?);
            }
            Ok(Value::Dict(dict))
        }
    }
}

impl World for VirtualWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        self.font_cache.book()
    }

    fn main(&self) -> FileId {
        self.main
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        self.filesystem
            .get_source(id)
            .ok_or_else(|| FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        self.filesystem
            .get_file(id)
            .cloned()
            .ok_or_else(|| FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.font_cache.font(index)
    }

    fn today(&self, offset: Option<i64>) -> Option<Datetime> {
        let adjusted = self.time + chrono::Duration::hours(offset.unwrap_or(0));

        Datetime::from_ymd_hms(
            adjusted.year(),
            adjusted.month() as u8,
            adjusted.day() as u8,
            adjusted.hour() as u8,
            adjusted.minute() as u8,
            adjusted.second() as u8,
        )
    }
}
