//! Operation identifiers and definition names.

use heck::ToLowerCamelCase;

/// Operations whose identifiers are derived from the service id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    List,
    Create,
    Simulate,
    LockDocument,
    BulkShow,
    BulkUpdate,
    BulkDelete,
    SecuredFields,
    Hook,
    ExperienceHook,
    Count,
    Show,
    Update,
    Destroy,
    Math,
    FileUpload,
    FileView,
    FileDownload,
    ExportedFileDownload,
    Export,
    ExportDetails,
    ExportDetailsCount,
    ExportDetailsDelete,
    HealthCheck,
    ReadinessCheck,
}

impl OperationKind {
    fn suffix(&self) -> &'static str {
        match self {
            Self::List => "List",
            Self::Create => "Create",
            Self::Simulate => "Simulate",
            Self::LockDocument => "LockDocument",
            Self::BulkShow => "BulkShow",
            Self::BulkUpdate => "BulkUpdate",
            Self::BulkDelete => "BulkDelete",
            Self::SecuredFields => "SecuredFields",
            Self::Hook => "Hook",
            Self::ExperienceHook => "ExperienceHook",
            Self::Count => "Count",
            Self::Show => "Show",
            Self::Update => "Update",
            Self::Destroy => "Destroy",
            Self::Math => "Math",
            Self::FileUpload => "FileUpload",
            Self::FileView => "FileView",
            Self::FileDownload => "FileDownload",
            Self::ExportedFileDownload => "ExportedFileDownload",
            Self::Export => "Export",
            Self::ExportDetails => "ExportDetails",
            Self::ExportDetailsCount => "ExportDetailsCount",
            Self::ExportDetailsDelete => "ExportDetailsDelete",
            Self::HealthCheck => "HealthCheck",
            Self::ReadinessCheck => "ReadinessCheck",
        }
    }
}

// File mapper and utility operations share fixed ids across services.
pub const FILE_MAPPER_LIST: &str = "fileMapperList";
pub const FILE_MAPPER_UPDATE_STATUS: &str = "updateFileStatus";
pub const FILE_MAPPER_CREATE: &str = "v1_bulkCreate";
pub const FILE_MAPPER_MAPPING: &str = "v1_mapping";
pub const FILE_MAPPER_ENRICH: &str = "v1_enrichData";
pub const FILE_MAPPER_ENRICH_FOR_WORKFLOW: &str = "v1_enrichDataForWF";
pub const FILE_MAPPER_COUNT: &str = "fileMapperCount";
pub const AGGREGATE: &str = "v1_aggregate";
pub const HREF_UPDATE: &str = "v1_updateHref";

/// Builds `v1_<service><Operation>` identifiers.
#[derive(Debug, Clone)]
pub struct OperationIds {
    prefix: String,
}

impl OperationIds {
    pub fn new(service_id: &str) -> Self {
        Self {
            prefix: format!("v1_{}", service_id.to_lower_camel_case()),
        }
    }

    pub fn get(&self, kind: OperationKind) -> String {
        format!("{}{}", self.prefix, kind.suffix())
    }
}

/// Names of the generated model definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionNames {
    pub create: String,
    pub update: String,
    pub math: String,
}

impl DefinitionNames {
    pub fn new(model_name: &str) -> Self {
        let base = model_name.to_lower_camel_case();
        Self {
            create: format!("{}_create", base),
            update: format!("{}_update", base),
            math: format!("{}_math", base),
        }
    }
}

/// `$ref` target for a definition name.
pub fn definition_ref(name: &str) -> String {
    format!("#/definitions/{}", name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_operation_ids_from_service_id() {
        let ids = OperationIds::new("order-service");

        assert_eq!(ids.get(OperationKind::List), "v1_orderServiceList");
        assert_eq!(ids.get(OperationKind::LockDocument), "v1_orderServiceLockDocument");
    }

    #[test]
    fn camel_cases_model_names() {
        let names = DefinitionNames::new("Customer Orders");

        assert_eq!(names.create, "customerOrders_create");
        assert_eq!(names.update, "customerOrders_update");
        assert_eq!(names.math, "customerOrders_math");
        assert_eq!(definition_ref(&names.create), "#/definitions/customerOrders_create");
    }
}
