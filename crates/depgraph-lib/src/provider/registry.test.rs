// Tests for the NuGet flat-container provider

use super::*;
use mockito::Server;
use std::io::Write;

const GROUPED_NUSPEC: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<package xmlns="http://schemas.microsoft.com/packaging/2013/05/nuspec.xsd">
  <metadata minClientVersion="2.12">
    <id>Serilog.Sinks.File</id>
    <version>5.0.0</version>
    <authors>Serilog Contributors</authors>
    <description>Write Serilog events to text files.</description>
    <dependencies>
      <group targetFramework=".NETFramework4.5">
        <dependency id="Serilog" version="[2.10.0, )" exclude="Build,Analyzers" />
      </group>
      <group targetFramework=".NETStandard2.0">
        <dependency id="serilog" version="2.10.0" />
        <dependency id="System.Text.Json" version="(, 7.0.0]" />
      </group>
      <group targetFramework="net5.0" />
    </dependencies>
  </metadata>
</package>"#;

const FLAT_NUSPEC: &str = r#"<?xml version="1.0"?>
<package>
  <metadata>
    <id>App</id>
    <version>1.0.0</version>
    <dependencies>
      <dependency id="Lib1" version="1.2.3" />
      <dependency version="9.9.9" />
      <dependency id="Lib2" />
    </dependencies>
  </metadata>
</package>"#;

/// Build an in-memory .nupkg holding a single manifest entry
fn nupkg(entry_name: &str, nuspec: &str) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file(entry_name, zip::write::SimpleFileOptions::default())
        .unwrap();
    writer.write_all(nuspec.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

fn provider_for(server: &Server) -> RegistryProvider {
    RegistryProvider::new(&server.url(), Duration::from_secs(5)).unwrap()
}

#[test]
fn test_package_url_lowercases_and_normalizes_base() {
    let timeout = Duration::from_secs(1);
    let with_slash =
        RegistryProvider::new("https://api.nuget.org/v3-flatcontainer/", timeout).unwrap();
    let without_slash =
        RegistryProvider::new("https://api.nuget.org/v3-flatcontainer", timeout).unwrap();

    let expected =
        "https://api.nuget.org/v3-flatcontainer/newtonsoft.json/13.0.3-beta/newtonsoft.json.13.0.3-beta.nupkg";
    assert_eq!(with_slash.package_url("Newtonsoft.Json", "13.0.3-Beta"), expected);
    assert_eq!(without_slash.package_url("Newtonsoft.Json", "13.0.3-Beta"), expected);
}

#[test]
fn test_version_floor() {
    assert_eq!(version_floor("1.2.0"), Some("1.2.0".to_string()));
    assert_eq!(version_floor("[1.2.0, )"), Some("1.2.0".to_string()));
    assert_eq!(version_floor("[1.0,2.0)"), Some("1.0".to_string()));
    assert_eq!(version_floor("[3.1.4]"), Some("3.1.4".to_string()));
    assert_eq!(version_floor("(, 2.0]"), None);
    assert_eq!(version_floor("   "), None);
}

#[test]
fn test_manifest_flat_dependencies_drop_missing_ids() {
    let manifest = PackageManifest::parse("App", FLAT_NUSPEC).unwrap();
    assert_eq!(manifest.metadata.id.as_deref(), Some("App"));
    assert_eq!(
        manifest.dependencies(),
        vec![
            Dependency::new("Lib1", Some("1.2.3".to_string())),
            Dependency::unversioned("Lib2"),
        ]
    );
}

#[test]
fn test_manifest_grouped_dependencies_are_merged_once() {
    let manifest = PackageManifest::parse("Serilog.Sinks.File", GROUPED_NUSPEC).unwrap();
    assert_eq!(manifest.metadata.dependencies.as_ref().unwrap().groups.len(), 3);
    assert_eq!(
        manifest.dependencies(),
        vec![
            Dependency::new("Serilog", Some("2.10.0".to_string())),
            Dependency::unversioned("System.Text.Json"),
        ]
    );
}

#[test]
fn test_manifest_without_dependencies() {
    let xml = "<package><metadata><id>Leaf</id><version>1.0.0</version></metadata></package>";
    let manifest = PackageManifest::parse("Leaf", xml).unwrap();
    assert!(manifest.dependencies().is_empty());
}

#[test]
fn test_malformed_manifest_is_reported() {
    let err = PackageManifest::parse("Broken", "<package><metadata>").unwrap_err();
    assert!(matches!(err, LookupError::Manifest { .. }));
    assert!(err.to_string().contains("Broken"));
}

#[test]
fn test_read_manifest_from_archive_finds_nuspec_case_insensitively() {
    let bytes = nupkg("App.NUSPEC", FLAT_NUSPEC);
    let xml = read_manifest_from_archive("App", &bytes).unwrap();
    assert!(xml.contains("<id>App</id>"));
}

#[test]
fn test_archive_without_manifest() {
    let bytes = nupkg("lib/net45/App.dll", "not a manifest");
    let err = read_manifest_from_archive("App", &bytes).unwrap_err();
    assert!(matches!(err, LookupError::MissingManifest { .. }));
}

#[test]
fn test_corrupt_archive() {
    let err = read_manifest_from_archive("App", b"definitely not a zip").unwrap_err();
    assert!(matches!(err, LookupError::Archive { .. }));
}

#[test]
fn test_lookup_downloads_and_parses_package() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/app/1.0.0/app.1.0.0.nupkg")
        .with_status(200)
        .with_body(nupkg("App.nuspec", FLAT_NUSPEC))
        .expect(1)
        .create();

    let provider = provider_for(&server);
    let deps = provider.lookup("App", "1.0.0").unwrap();

    assert_eq!(
        deps,
        vec![
            Dependency::new("Lib1", Some("1.2.3".to_string())),
            Dependency::unversioned("Lib2"),
        ]
    );
    mock.assert();
}

#[test]
fn test_lookup_not_found() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/ghost/0.1.0/ghost.0.1.0.nupkg")
        .with_status(404)
        .create();

    let provider = provider_for(&server);
    let err = provider.lookup("Ghost", "0.1.0").unwrap_err();

    match err {
        LookupError::NotFound { package, version } => {
            assert_eq!(package, "Ghost");
            assert_eq!(version, "0.1.0");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_lookup_server_error_is_http_failure() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/app/1.0.0/app.1.0.0.nupkg")
        .with_status(500)
        .create();

    let provider = provider_for(&server);
    let err = provider.lookup("App", "1.0.0").unwrap_err();
    assert!(matches!(err, LookupError::Http { .. }));
}

#[test]
fn test_resolve_reports_published_name_for_any_casing() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/app/1.0.0/app.1.0.0.nupkg")
        .with_status(200)
        .with_body(nupkg("App.nuspec", FLAT_NUSPEC))
        .create();

    let provider = provider_for(&server);
    let resolved = provider.resolve("APP", "1.0.0").unwrap();

    assert_eq!(resolved.canonical.as_deref(), Some("App"));
    assert_eq!(resolved.dependencies.len(), 2);
}

#[test]
fn test_manifest_blank_id_is_not_a_name() {
    let xml = "<package><metadata><id>  </id></metadata></package>";
    let manifest = PackageManifest::parse("Leaf", xml).unwrap();
    assert_eq!(manifest.id(), None);
}
