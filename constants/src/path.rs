/// Scene manifest asset, relative to the asset root.
pub const RELATIVE_MANIFEST_PATH: &str = "demo/scene_manifest.json";

/// Partner records table, relative to the asset root.
pub const RELATIVE_RECORDS_PATH: &str = "demo/partner_records.csv";

/// Path of the implicit scene root object; all manifest nodes hang below it.
pub const SCENE_ROOT: &str = "/World";
