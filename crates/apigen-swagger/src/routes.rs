//! Route table builder.
//!
//! Emits one path item per supported endpoint of a generated service. The
//! table is fixed apart from two switches: the search parameter (only when the
//! model enables search indexing) and the math route (only when a math schema
//! was derived).

use indexmap::IndexMap;
use serde_json::json;

use apigen_model::ModelConfig;
use apigen_schema::{Schema, SchemaType};

use crate::document::{HttpMethod, Operation, Parameter, PathItem, Response};
use crate::naming::{
    definition_ref, DefinitionNames, OperationIds, OperationKind, AGGREGATE, FILE_MAPPER_COUNT,
    FILE_MAPPER_CREATE, FILE_MAPPER_ENRICH, FILE_MAPPER_ENRICH_FOR_WORKFLOW, FILE_MAPPER_LIST,
    FILE_MAPPER_MAPPING, FILE_MAPPER_UPDATE_STATUS, HREF_UPDATE,
};
use crate::parameters;

/// Path of the global bulk-update alias, which is not scoped by base path.
pub const GLOBAL_BULK_UPDATE_PATH: &str = "/bulkUpdate";

const BAD_REQUEST: &str = "Bad parameters";
const SERVER_ERROR: &str = "Internal server error";
const NOT_FOUND: &str = "No records to list with the given parameter set.";
const LISTED: &str = "List of the entites";

fn responses(entries: &[(&str, &str)]) -> IndexMap<String, Response> {
    entries
        .iter()
        .map(|(code, description)| {
            (
                code.to_string(),
                Response {
                    description: description.to_string(),
                },
            )
        })
        .collect()
}

/// Success, bad request, server error.
fn standard(success: &str) -> IndexMap<String, Response> {
    responses(&[("200", success), ("400", BAD_REQUEST), ("500", SERVER_ERROR)])
}

/// Standard table plus not-found, for routes addressing one document.
fn addressed(success: &str) -> IndexMap<String, Response> {
    responses(&[
        ("200", success),
        ("400", BAD_REQUEST),
        ("404", NOT_FOUND),
        ("500", SERVER_ERROR),
    ])
}

fn bulk() -> IndexMap<String, Response> {
    responses(&[
        ("200", "Empty Object"),
        ("400", "List document ids not deleted"),
        ("500", SERVER_ERROR),
    ])
}

fn health() -> IndexMap<String, Response> {
    responses(&[("200", "Success"), ("400", "Error")])
}

/// Builds the path table of one model.
pub struct RouteTableBuilder<'a> {
    config: &'a ModelConfig,
    definitions: &'a DefinitionNames,
    ids: OperationIds,
    base: String,
    with_math: bool,
    paths: IndexMap<String, PathItem>,
}

impl<'a> RouteTableBuilder<'a> {
    /// Create a builder. `with_math` adds the math route.
    pub fn new(config: &'a ModelConfig, definitions: &'a DefinitionNames, with_math: bool) -> Self {
        Self {
            config,
            definitions,
            ids: OperationIds::new(&config.id),
            base: config.base_path(),
            with_math,
            paths: IndexMap::new(),
        }
    }

    /// Build the full path table.
    pub fn build(mut self) -> IndexMap<String, PathItem> {
        self.collection_routes();
        self.utility_routes();
        self.bulk_routes();
        self.document_routes();
        self.file_routes();
        self.file_mapper_routes();
        self.export_routes();
        self.query_routes();
        self.health_routes();

        tracing::debug!(
            "Built {} routes under {} for '{}'",
            self.paths.len(),
            self.base,
            self.config.name
        );

        self.paths
    }

    fn scoped(&self, suffix: &str) -> String {
        format!("{}{}", self.base, suffix)
    }

    /// Register a path. Verbs on an already registered path are merged into it.
    fn add(&mut self, path: String, item: PathItem) {
        match self.paths.get_mut(&path) {
            Some(existing) => {
                for method in existing.merge(item) {
                    tracing::warn!(
                        "Route {} {} is bound twice, keeping the later operation",
                        method.as_str(),
                        path
                    );
                }
            }
            None => {
                self.paths.insert(path, item);
            }
        }
    }

    fn body_ref(&self, description: String, definition: &str) -> Parameter {
        Parameter::body("data", description, Schema::reference(definition_ref(definition)))
    }

    /// Parameters with the search option appended when the model is indexed.
    fn searchable(&self, mut params: Vec<Parameter>) -> Vec<Parameter> {
        if self.config.enable_search_index {
            params.push(parameters::search());
        }
        params
    }

    fn collection_routes(&mut self) {
        let name = &self.config.name;

        let mut list_params = parameters::list();
        list_params.push(parameters::expand());
        let list = Operation::new(
            format!("Retrieve a list of '{}'", name),
            self.ids.get(OperationKind::List),
            self.searchable(list_params),
            standard(LISTED),
        );

        let create = Operation::new(
            format!("Create a new '{}'", name),
            self.ids.get(OperationKind::Create),
            vec![
                self.body_ref(
                    format!("Payload to create a '{}'", name),
                    &self.definitions.create,
                ),
                parameters::authorization(),
                Parameter::query(
                    "expireAt",
                    "string",
                    "ISO format date after which the document will get deleted",
                ),
                Parameter::query(
                    "expireAfter",
                    "string",
                    "Time after which the document will get deleted.",
                ),
                Parameter::query("abortOnError", "boolean", "Aborts operation with rollback"),
                Parameter::query("upsert", "boolean", "upsert parameter"),
            ],
            standard("List of the entites created"),
        );

        let item = PathItem::new()
            .with(HttpMethod::Get, list)
            .with(HttpMethod::Post, create);
        self.add(self.base.clone(), item);
    }

    fn utility_routes(&mut self) {
        let name = self.config.name.clone();

        let simulate = Operation::new(
            format!("validate '{}'", name),
            self.ids.get(OperationKind::Simulate),
            vec![
                self.body_ref(
                    format!("Payload to validate '{}'", name),
                    &self.definitions.update,
                ),
                parameters::authorization(),
                Parameter::query("generateId", "boolean", "Generate Id for the document")
                    .with_default(json!(false)),
                Parameter::query("operation", "string", "request method")
                    .with_default(json!(false)),
                Parameter::query("docId", "string", "request method")
                    .with_default(json!(false)),
                Parameter::query("select", "string", "select in case of get")
                    .with_default(json!(false)),
            ],
            standard(LISTED),
        );
        self.add(
            self.scoped("/utils/simulate"),
            PathItem::new().with(HttpMethod::Post, simulate),
        );

        let mut lock_properties = IndexMap::new();
        lock_properties.insert("id".to_string(), Schema::of_type(SchemaType::single("string")));
        lock_properties.insert("wfId".to_string(), Schema::of_type(SchemaType::nullable("string")));
        let lock = Operation::new(
            format!("lock '{}'", name),
            self.ids.get(OperationKind::LockDocument),
            vec![
                Parameter::body(
                    "data",
                    format!("Payload to validate '{}'", name),
                    Schema::object(lock_properties),
                ),
                parameters::authorization(),
            ],
            standard(LISTED),
        );
        self.add(self.scoped("/lock"), PathItem::new().with(HttpMethod::Put, lock));

        let bulk_show = Operation::new(
            format!("Retrieve a list of '{}'", name),
            self.ids.get(OperationKind::BulkShow),
            parameters::bulk_show(),
            standard(LISTED),
        );
        self.add(
            self.scoped("/utils/bulkShow"),
            PathItem::new().with(HttpMethod::Get, bulk_show),
        );

        let secured_fields = Operation::new(
            format!("Retrieve a list of secured fields in '{}'", name),
            self.ids.get(OperationKind::SecuredFields),
            Vec::new(),
            standard(LISTED),
        );
        self.add(
            self.scoped("/utils/securedFields"),
            PathItem::new().with(HttpMethod::Get, secured_fields),
        );

        let hook = Operation::new(
            "triggers the hook with data",
            self.ids.get(OperationKind::Hook),
            parameters::hook(),
            standard(LISTED),
        );
        self.add(self.scoped("/hook"), PathItem::new().with(HttpMethod::Post, hook));

        let experience_hook = Operation::new(
            "triggers the hook with data",
            self.ids.get(OperationKind::ExperienceHook),
            parameters::experience_hook(),
            standard(LISTED),
        );
        self.add(
            self.scoped("/utils/experienceHook"),
            PathItem::new().with(HttpMethod::Post, experience_hook),
        );
    }

    fn bulk_update(&self) -> Operation {
        Operation::new(
            format!("Updates a list of '{}'", self.config.name),
            self.ids.get(OperationKind::BulkUpdate),
            vec![
                parameters::authorization(),
                parameters::id_list(),
                self.body_ref(
                    format!("Payload to Update '{}'", self.config.name),
                    &self.definitions.update,
                ),
            ],
            bulk(),
        )
    }

    fn bulk_routes(&mut self) {
        // Both aliases share one operation id.
        let global = PathItem::new().with(HttpMethod::Post, self.bulk_update());
        self.add(GLOBAL_BULK_UPDATE_PATH.to_string(), global);

        let scoped = PathItem::new().with(HttpMethod::Put, self.bulk_update());
        self.add(self.scoped("/bulkUpdate"), scoped);

        let bulk_delete = Operation::new(
            format!("Deletes a list of '{}'", self.config.name),
            self.ids.get(OperationKind::BulkDelete),
            parameters::bulk_delete(),
            bulk(),
        );
        self.add(
            self.scoped("/utils/bulkDelete"),
            PathItem::new().with(HttpMethod::Delete, bulk_delete),
        );

        let count = Operation::new(
            format!("returns count of '{}'", self.config.name),
            self.ids.get(OperationKind::Count),
            parameters::count(),
            standard("Count of the entites"),
        );
        self.add(
            self.scoped("/utils/count"),
            PathItem::new().with(HttpMethod::Get, count),
        );
    }

    fn document_routes(&mut self) {
        let name = self.config.name.clone();

        let mut show_params = parameters::show();
        show_params.push(parameters::expand());
        let show = Operation::new(
            format!("Retrieve an existing '{}'", name),
            self.ids.get(OperationKind::Show),
            show_params,
            addressed(&format!("{} document", name)),
        );

        let update = Operation::new(
            format!("Update an existing '{}'", name),
            self.ids.get(OperationKind::Update),
            vec![
                self.body_ref(
                    format!("Payload to update a '{}'", name),
                    &self.definitions.update,
                ),
                Parameter::path("id", format!("Id of the '{}' to be updated", name)),
                parameters::authorization(),
                Parameter::query(
                    "expireAt",
                    "string",
                    "ISO format date after which the document will get deleted",
                ),
                Parameter::query(
                    "expireAfter",
                    "string",
                    "Time after which the document will get deleted.",
                ),
            ],
            addressed("Update entry"),
        );

        let destroy = Operation::new(
            format!("Delete an existing '{}'", name),
            self.ids.get(OperationKind::Destroy),
            vec![
                Parameter::path("id", format!("Id of the '{}' to be deleted", name)),
                parameters::authorization(),
            ],
            addressed("Empty object"),
        );

        let item = PathItem::new()
            .with(HttpMethod::Get, show)
            .with(HttpMethod::Put, update)
            .with(HttpMethod::Delete, destroy);
        self.add(self.scoped("/{id}"), item);

        if self.with_math {
            let math = Operation::new(
                format!("Does math operation on a '{}'", name),
                self.ids.get(OperationKind::Math),
                vec![
                    self.body_ref(
                        format!("Payload to update a '{}'", name),
                        &self.definitions.math,
                    ),
                    Parameter::path("id", format!("Id of the '{}' to be updated", name)),
                    parameters::authorization(),
                ],
                addressed("Update entry"),
            );
            self.add(self.scoped("/{id}/math"), PathItem::new().with(HttpMethod::Put, math));
        }
    }

    fn file_routes(&mut self) {
        let upload = Operation::new(
            "Uploads the file",
            self.ids.get(OperationKind::FileUpload),
            vec![parameters::authorization()],
            standard("meta data of file"),
        );
        self.add(
            self.scoped("/file/upload"),
            PathItem::new().with(HttpMethod::Post, upload),
        );

        let view = Operation::new(
            "View the file",
            self.ids.get(OperationKind::FileView),
            vec![Parameter::path("id", "Id of file"), parameters::authorization()],
            standard("file data"),
        );
        self.add(
            self.scoped("/file/{id}/view"),
            PathItem::new().with(HttpMethod::Get, view),
        );

        let download = Operation::new(
            "Download the file",
            self.ids.get(OperationKind::FileDownload),
            vec![Parameter::path("id", "Id of file")],
            standard("file download"),
        );
        self.add(
            self.scoped("/file/download/{id}"),
            PathItem::new().with(HttpMethod::Get, download),
        );

        let export_download = Operation::new(
            "Download the file",
            self.ids.get(OperationKind::ExportedFileDownload),
            vec![
                Parameter::path("id", "Id of file"),
                Parameter::query("filename", "string", "filename of file"),
            ],
            standard("file download"),
        );
        self.add(
            self.scoped("/export/download/{id}"),
            PathItem::new().with(HttpMethod::Get, export_download),
        );
    }

    fn file_mapper_routes(&mut self) {
        let name = self.config.name.clone();

        let mut list_params = parameters::list();
        list_params.push(parameters::file_id());
        let list = Operation::new(
            format!("Retrieve a list of '{}'", name),
            FILE_MAPPER_LIST,
            list_params,
            standard(LISTED),
        );
        let update_status = Operation::new(
            "Update file Status",
            FILE_MAPPER_UPDATE_STATUS,
            vec![Parameter::path("fileId", "Id of file"), parameters::authorization()],
            standard("File Updated"),
        );
        self.add(
            self.scoped("/fileMapper/{fileId}"),
            PathItem::new()
                .with(HttpMethod::Get, list)
                .with(HttpMethod::Put, update_status),
        );

        let create = Operation::new(
            "Create the data in the file",
            FILE_MAPPER_CREATE,
            vec![
                Parameter::body(
                    "data",
                    "Payload to bulkCreate",
                    Schema::reference(definition_ref(crate::generate::BULK_CREATE_DEFINITION)),
                ),
                parameters::authorization(),
                parameters::file_id(),
            ],
            standard("Stats of bulkCreate"),
        );
        self.add(
            self.scoped("/fileMapper/{fileId}/create"),
            PathItem::new().with(HttpMethod::Post, create),
        );

        let mapping = Operation::new(
            "Uploads the file containing data",
            FILE_MAPPER_MAPPING,
            vec![
                Parameter::body(
                    "data",
                    "Payload to validate data",
                    Schema::of_type(SchemaType::single("object")),
                ),
                parameters::authorization(),
                parameters::file_id(),
                Parameter::query("timezone", "string", "Timezone in which Date should be."),
            ],
            standard("Data validated against mapping"),
        );
        self.add(
            self.scoped("/fileMapper/{fileId}/mapping"),
            PathItem::new().with(HttpMethod::Put, mapping),
        );

        let enrich = Operation::new(
            "Enrich the sheet data",
            FILE_MAPPER_ENRICH,
            vec![
                Parameter::body(
                    "data",
                    "Payload to validate data",
                    Schema::reference(definition_ref(crate::generate::ENRICH_DEFINITION)),
                ),
                parameters::authorization(),
            ],
            standard("Data enriched against mapping"),
        );
        self.add(
            self.scoped("/fileMapper/enrich"),
            PathItem::new().with(HttpMethod::Put, enrich),
        );

        let enrich_for_workflow = Operation::new(
            "Enrich the sheet data for Record ID",
            FILE_MAPPER_ENRICH_FOR_WORKFLOW,
            vec![
                parameters::page(),
                parameters::authorization(),
                parameters::page_size(),
                parameters::file_id(),
                Parameter::query("operation", "string", "request method")
                    .with_default(json!("false")),
                Parameter::query("filter", "string", "filter"),
            ],
            standard("Data enriched against mapping"),
        );
        self.add(
            self.scoped("/fileMapper/{fileId}/enrichDataForWF"),
            PathItem::new().with(HttpMethod::Get, enrich_for_workflow),
        );

        let mut count_params = parameters::count();
        count_params.push(parameters::file_id());
        let count = Operation::new(
            format!("returns count of '{}'", name),
            FILE_MAPPER_COUNT,
            count_params,
            standard("Count of the entites"),
        );
        self.add(
            self.scoped("/fileMapper/{fileId}/count"),
            PathItem::new().with(HttpMethod::Get, count),
        );
    }

    fn export_routes(&mut self) {
        let mut export_params = parameters::export();
        export_params.push(parameters::expand());
        let mut export_params = self.searchable(export_params);
        export_params.push(parameters::total_records());
        export_params.push(parameters::timezone_offset());

        let export = Operation::new(
            format!("Retrieve a list of '{}'", self.config.name),
            self.ids.get(OperationKind::Export),
            export_params,
            standard(LISTED),
        );
        self.add(
            self.scoped("/utils/export"),
            PathItem::new().with(HttpMethod::Post, export),
        );

        let transfers = Operation::new(
            "Retrieve list of bulk actions",
            self.ids.get(OperationKind::ExportDetails),
            parameters::list(),
            standard(LISTED),
        );
        self.add(
            self.scoped("/utils/fileTransfers"),
            PathItem::new().with(HttpMethod::Get, transfers),
        );

        let transfer_count = Operation::new(
            "count of bulk actions",
            self.ids.get(OperationKind::ExportDetailsCount),
            parameters::list(),
            standard(LISTED),
        );
        self.add(
            self.scoped("/utils/fileTransfers/count"),
            PathItem::new().with(HttpMethod::Get, transfer_count),
        );

        let transfer_delete = Operation::new(
            "delete file",
            self.ids.get(OperationKind::ExportDetailsDelete),
            vec![Parameter::path("id", "Id of file"), parameters::authorization()],
            standard(LISTED),
        );
        self.add(
            self.scoped("/utils/fileTransfers/{id}"),
            PathItem::new().with(HttpMethod::Delete, transfer_delete),
        );
    }

    fn query_routes(&mut self) {
        let aggregate_body = Schema {
            schema_type: Some(SchemaType::single("array")),
            items: Some(Box::new(Schema::of_type(SchemaType::single("object")))),
            ..Default::default()
        };
        let aggregate = Operation::new(
            "runs aggregate query",
            AGGREGATE,
            vec![
                parameters::authorization(),
                Parameter::body("data", "Payload to aggregate", aggregate_body),
            ],
            standard(LISTED),
        );
        self.add(
            self.scoped("/utils/aggregate"),
            PathItem::new().with(HttpMethod::Post, aggregate),
        );

        let href_update = Operation::new(
            "Update url of outgoing relations",
            HREF_UPDATE,
            vec![Parameter::body(
                "data",
                "Payload to update href",
                Schema::of_type(SchemaType::single("object")),
            )],
            standard(LISTED),
        );
        self.add(
            self.scoped("/utils/hrefUpdate"),
            PathItem::new().with(HttpMethod::Put, href_update),
        );
    }

    fn health_routes(&mut self) {
        let live = Operation::new(
            "Healthcheck API for service",
            self.ids.get(OperationKind::HealthCheck),
            Vec::new(),
            health(),
        );
        self.add(
            self.scoped("/health/live"),
            PathItem::new().with(HttpMethod::Get, live),
        );

        let ready = Operation::new(
            "Healthcheck API for service",
            self.ids.get(OperationKind::ReadinessCheck),
            Vec::new(),
            health(),
        );
        self.add(
            self.scoped("/health/ready"),
            PathItem::new().with(HttpMethod::Get, ready),
        );
    }
}
