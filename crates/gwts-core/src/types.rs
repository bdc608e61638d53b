use serde::{Deserialize, Serialize};

/// Content emitted for a requested file that has nothing to export
pub const EMPTY_FILE_CONTENT: &str = "export default {}";

/// Analyzed view of one proto file, ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileModel {
    /// Source identifier as it appears in `file_to_generate`
    pub name: String,
    /// Precomputed output path for the generated module
    pub output_file_name: String,
    pub package: String,
    pub imports: Vec<Import>,
    /// Module path of the shared fetch module relative to this file
    pub shared_module_import: String,
    pub enums: Vec<Enum>,
    pub messages: Vec<Message>,
    pub services: ServiceSet,
}

/// Whether a file model has anything worth rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileContent {
    Empty,
    HasContent,
}

impl FileModel {
    pub fn new(name: impl Into<String>, output_file_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            output_file_name: output_file_name.into(),
            package: String::new(),
            imports: Vec::new(),
            shared_module_import: String::new(),
            enums: Vec::new(),
            messages: Vec::new(),
            services: ServiceSet::default(),
        }
    }

    pub fn content(&self) -> FileContent {
        if self.enums.is_empty() && self.messages.is_empty() && self.services.is_empty() {
            FileContent::Empty
        } else {
            FileContent::HasContent
        }
    }
}

/// Another generated module imported under a namespace alias
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    pub alias: String,
    pub module_path: String,
    /// Proto file the import points at
    pub source_file: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub number: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub name: String,
    pub fq_name: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ts_type: String,
}

/// Services declared in one file, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceSet(pub Vec<Service>);

impl ServiceSet {
    pub fn new(services: Vec<Service>) -> Self {
        Self(services)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Service> {
        self.0.iter()
    }

    /// True when the file emits any client class, since every class
    /// references the shared fetch module
    pub fn requires_shared_adapter(&self) -> bool {
        !self.0.is_empty()
    }
}

impl FromIterator<Service> for ServiceSet {
    fn from_iter<I: IntoIterator<Item = Service>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub fq_name: String,
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub input_type: String,
    pub output_type: String,
    /// URL path the gateway exposes the method on, with `${req["field"]}`
    /// placeholders for path variables
    pub path: String,
    pub http_method: String,
    /// `*` sends the whole request, a field name sends that field. Without a
    /// body every field not bound in the path goes to the query string.
    pub body: Option<String>,
    pub path_params: Vec<String>,
    pub server_streaming: bool,
}

/// A finished generated file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFile {
    pub name: String,
    pub content: String,
}

impl OutputFile {
    /// Content is trimmed of leading and trailing whitespace
    pub fn new(name: impl Into<String>, content: &str) -> Self {
        Self {
            name: name.into(),
            content: content.trim().to_string(),
        }
    }
}
