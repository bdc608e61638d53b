use prost::Message as _;
use prost_reflect::{
    DescriptorPool, EnumDescriptor, ExtensionDescriptor, FieldDescriptor, FileDescriptor, Kind,
    MessageDescriptor, ServiceDescriptor,
};
use prost_types::FileDescriptorProto;
use std::collections::HashSet;
use tracing::{debug, warn};

use gwts_core::{
    Analyzer, CodeGeneratorRequest, Enum, EnumValue, Field, FileModel, GatewayError,
    GenerationOptions, Import, Message, Method, Result, Service, ServiceSet,
};

use crate::http_rule::{self, HttpBinding, HTTP_RULE_EXTENSION};
use crate::naming;

#[derive(Clone, PartialEq, prost::Message)]
struct RawFileDescriptorSet {
    #[prost(bytes = "vec", repeated, tag = "1")]
    file: Vec<Vec<u8>>,
}

/// Default analyzer: builds file models from the request descriptors, with
/// HTTP bindings taken from `google.api.http` method options
#[derive(Debug, Clone, Default)]
pub struct Registry {
    options: GenerationOptions,
}

impl Registry {
    pub fn new(options: GenerationOptions) -> Self {
        Self { options }
    }

    fn analyze_file(
        &self,
        file: &FileDescriptor,
        http_extension: Option<&ExtensionDescriptor>,
    ) -> Result<FileModel> {
        let name = file.name();
        let output_file_name = naming::output_file_name(name);
        let mut model = FileModel::new(name, output_file_name.as_str());
        model.package = file.package_name().to_string();
        model.shared_module_import =
            naming::relative_module_path(&output_file_name, &self.options.shared_module_path());

        let mut resolver = TypeResolver {
            file: name,
            output_file_name: &output_file_name,
            imports: Vec::new(),
        };

        for enum_type in file.enums() {
            model.enums.push(convert_enum(&enum_type));
        }
        for message in file.messages() {
            self.collect_message(&message, &mut resolver, &mut model);
        }

        model.services = file
            .services()
            .map(|service| self.convert_service(&service, http_extension, &mut resolver))
            .collect::<Result<ServiceSet>>()?;

        model.imports = resolver.imports;

        debug!(
            "Analyzed {}: {} enums, {} messages, {} services, {} imports",
            name,
            model.enums.len(),
            model.messages.len(),
            model.services.len(),
            model.imports.len()
        );
        Ok(model)
    }

    /// Depth first, parent before its nested types. Map entries are skipped.
    fn collect_message(
        &self,
        message: &MessageDescriptor,
        resolver: &mut TypeResolver<'_>,
        model: &mut FileModel,
    ) {
        if message.is_map_entry() {
            return;
        }

        let fields = message
            .fields()
            .map(|field| Field {
                name: self.field_name(&field),
                ts_type: resolver.field_type(&field),
            })
            .collect();

        model.messages.push(Message {
            name: naming::local_type_name(message.full_name(), &model.package),
            fq_name: message.full_name().to_string(),
            fields,
        });

        for enum_type in message.child_enums() {
            model.enums.push(convert_enum(&enum_type));
        }
        for nested in message.child_messages() {
            self.collect_message(&nested, resolver, model);
        }
    }

    fn convert_service(
        &self,
        service: &ServiceDescriptor,
        http_extension: Option<&ExtensionDescriptor>,
        resolver: &mut TypeResolver<'_>,
    ) -> Result<Service> {
        let fq_name = service.full_name();

        let mut methods = Vec::new();
        for method in service.methods() {
            let method_name = format!("{}.{}", fq_name, method.name());
            if method.is_client_streaming() {
                warn!(
                    "Skipping {}: client streaming methods have no fetch binding",
                    method_name
                );
                continue;
            }

            let binding = http_extension
                .and_then(|extension| HttpBinding::from_method(&method, extension))
                .unwrap_or_else(|| HttpBinding::default_route(fq_name, method.name()));
            let route = http_rule::render_path(&binding.path_template, |field| {
                self.request_field_name(field)
            })
            .map_err(|reason| GatewayError::HttpRule {
                method: method_name.clone(),
                reason,
            })?;
            let body = binding.body.map(|body| {
                if body == "*" {
                    body
                } else {
                    self.request_field_name(&body)
                }
            });
            debug!(
                "{} is bound to {} {}",
                method_name, binding.http_method, binding.path_template
            );

            methods.push(Method {
                name: method.name().to_string(),
                input_type: resolver.message_type(&method.input()),
                output_type: resolver.message_type(&method.output()),
                path: route.path,
                http_method: binding.http_method,
                body,
                path_params: route.params,
                server_streaming: method.is_server_streaming(),
            });
        }

        debug!("Service {} has {} methods", fq_name, methods.len());
        Ok(Service {
            name: service.name().to_string(),
            fq_name: fq_name.to_string(),
            methods,
        })
    }

    fn field_name(&self, field: &FieldDescriptor) -> String {
        if self.options.use_proto_names {
            field.name().to_string()
        } else {
            field.json_name().to_string()
        }
    }

    /// Request property for a proto field named in an HTTP rule
    fn request_field_name(&self, field: &str) -> String {
        if self.options.use_proto_names {
            field.to_string()
        } else {
            naming::lower_camel_case(field)
        }
    }
}

impl Analyzer for Registry {
    fn analyze(&self, request: &CodeGeneratorRequest) -> Result<Vec<FileModel>> {
        let names = file_names(&request.proto_file)?;
        let pool = build_descriptor_pool(&request.proto_file)?;
        let http_extension = pool.get_extension_by_name(HTTP_RULE_EXTENSION);
        debug!(
            "Built descriptor pool over {} files, {} found: {}",
            names.len(),
            HTTP_RULE_EXTENSION,
            http_extension.is_some()
        );

        names
            .iter()
            .map(|name| {
                let file = pool.get_file_by_name(name).ok_or_else(|| {
                    GatewayError::Descriptor(format!("{} missing from descriptor pool", name))
                })?;
                self.analyze_file(&file, http_extension.as_ref())
            })
            .collect()
    }
}

/// Names of the request files in order, rejecting unnamed and duplicate ones
fn file_names(files: &[Vec<u8>]) -> Result<Vec<String>> {
    let mut names = Vec::with_capacity(files.len());
    let mut seen = HashSet::new();

    for encoded in files {
        let file = FileDescriptorProto::decode(encoded.as_slice())?;
        let name = file.name().to_string();
        if name.is_empty() {
            return Err(GatewayError::Descriptor(
                "file descriptor without a name".to_string(),
            ));
        }
        if !seen.insert(name.clone()) {
            return Err(GatewayError::Descriptor(format!(
                "duplicate file descriptor: {}",
                name
            )));
        }
        names.push(name);
    }

    Ok(names)
}

fn build_descriptor_pool(files: &[Vec<u8>]) -> Result<DescriptorPool> {
    let set = RawFileDescriptorSet {
        file: files.to_vec(),
    };
    DescriptorPool::decode(set.encode_to_vec().as_slice())
        .map_err(|err| GatewayError::Descriptor(err.to_string()))
}

/// Resolves descriptor types to TypeScript for one file, recording the imports it needs
struct TypeResolver<'a> {
    file: &'a str,
    output_file_name: &'a str,
    imports: Vec<Import>,
}

impl TypeResolver<'_> {
    fn field_type(&mut self, field: &FieldDescriptor) -> String {
        if field.is_map() {
            if let Kind::Message(entry) = field.kind() {
                let value = entry.map_entry_value_field();
                return format!("{{[key: string]: {}}}", self.kind_type(&value.kind()));
            }
        }

        let ts_type = self.kind_type(&field.kind());
        if field.is_list() {
            format!("{}[]", ts_type)
        } else {
            ts_type
        }
    }

    fn kind_type(&mut self, kind: &Kind) -> String {
        let ts_type = match kind {
            Kind::Double | Kind::Float => "number",
            Kind::Int32 | Kind::Uint32 | Kind::Sint32 | Kind::Fixed32 | Kind::Sfixed32 => "number",
            Kind::Int64 | Kind::Uint64 | Kind::Sint64 | Kind::Fixed64 | Kind::Sfixed64 => "string",
            Kind::Bool => "boolean",
            Kind::String => "string",
            Kind::Bytes => "Uint8Array",
            Kind::Message(message) => return self.message_type(message),
            Kind::Enum(enum_type) => {
                return self.named(enum_type.full_name(), &enum_type.parent_file())
            }
        };
        ts_type.to_string()
    }

    fn message_type(&mut self, message: &MessageDescriptor) -> String {
        if let Some(ts_type) = well_known_type(message.full_name()) {
            return ts_type.to_string();
        }
        self.named(message.full_name(), &message.parent_file())
    }

    fn named(&mut self, full_name: &str, file: &FileDescriptor) -> String {
        let ts_name = naming::local_type_name(full_name, file.package_name());
        if file.name() == self.file {
            return ts_name;
        }

        let alias = self.import_alias(file.name());
        format!("{}.{}", alias, ts_name)
    }

    fn import_alias(&mut self, source_file: &str) -> String {
        if let Some(import) = self.imports.iter().find(|i| i.source_file == source_file) {
            return import.alias.clone();
        }

        // different paths can flatten to the same alias
        let base = naming::import_alias(source_file);
        let mut alias = base.clone();
        let mut suffix = 1;
        while self.imports.iter().any(|i| i.alias == alias) {
            suffix += 1;
            alias = format!("{}{}", base, suffix);
        }

        self.imports.push(Import {
            alias: alias.clone(),
            module_path: naming::relative_module_path(
                self.output_file_name,
                &naming::output_file_name(source_file),
            ),
            source_file: source_file.to_string(),
        });
        alias
    }
}

fn well_known_type(full_name: &str) -> Option<&'static str> {
    match full_name {
        "google.protobuf.Timestamp" | "google.protobuf.Duration" | "google.protobuf.FieldMask" => {
            Some("string")
        }
        "google.protobuf.Empty" => Some("{}"),
        "google.protobuf.Struct" | "google.protobuf.Value" | "google.protobuf.Any" => {
            Some("unknown")
        }
        _ => None,
    }
}

fn convert_enum(enum_type: &EnumDescriptor) -> Enum {
    let package = enum_type.parent_file().package_name().to_string();
    Enum {
        name: naming::local_type_name(enum_type.full_name(), &package),
        values: enum_type
            .values()
            .map(|value| EnumValue {
                name: value.name().to_string(),
                number: value.number(),
            })
            .collect(),
    }
}
