//! End-to-end tests for config resolution over real project directories

use plus_core::{
    ConfigData, ConfigValue, Error, Extension, ExtensionConfigFile, ResolveOptions,
    StaticModuleLoader, Warnings, load_config_data, load_root_definitions,
};
use plus_meta::ConfigEnv;
use plus_test_utils::TestProject;
use pretty_assertions::assert_eq;
use serde_json::json;

async fn resolve(project: &TestProject) -> plus_core::Result<ConfigData> {
    let options = ResolveOptions::load(project.root())?;
    load_config_data(&options, &StaticModuleLoader::new(), &Warnings::new()).await
}

fn reference(module_path: &str, export_name: &str) -> ConfigValue {
    ConfigValue::CodeReference {
        module_path: module_path.to_string(),
        export_name: export_name.to_string(),
    }
}

mod precedence_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_deeper_config_file_wins() {
        let project = TestProject::new();
        project
            .json("/pages/+config.json", json!({ "Page": "./Page.js" }))
            .touch("/pages/Page.js")
            .json("/pages/about/+config.json", json!({ "Page": "./About.js" }))
            .touch("/pages/about/About.js");

        let data = resolve(&project).await.unwrap();

        let ids: Vec<&str> = data.pages.iter().map(|p| p.page_id.as_str()).collect();
        assert_eq!(ids, vec!["/pages", "/pages/about"]);

        let root = data.page("/pages").unwrap();
        assert_eq!(root.route_filesystem.as_deref(), Some("/"));
        assert_eq!(root.elements["Page"].value, reference("/pages/Page.js", "default"));

        let about = data.page("/pages/about").unwrap();
        assert_eq!(about.route_filesystem.as_deref(), Some("/about"));
        assert_eq!(about.elements["Page"].value, reference("/pages/about/About.js", "default"));
        assert_eq!(about.elements["Page"].defined_by_file, "/pages/about/+config.json");
        assert_eq!(
            about.config_files,
            vec!["/pages/+config.json", "/pages/about/+config.json"]
        );
    }

    #[tokio::test]
    async fn test_value_file_and_config_entry_at_same_depth_are_ambiguous() {
        let project = TestProject::new();
        project
            .json(
                "/pages/+config.json",
                json!({
                    "meta": { "title": { "env": "config-only" } },
                    "Page": "./Page.js",
                    "title": "Root"
                }),
            )
            .touch("/pages/Page.js")
            .json("/pages/+title.json", json!("Override"));

        let err = resolve(&project).await.unwrap_err();
        assert!(err.is_usage());
        let message = err.to_string();
        assert!(message.contains("'title'"), "{message}");
        assert!(message.contains("/pages/+title.json"), "{message}");
        assert!(message.contains("/pages/+config.json"), "{message}");
    }

    #[tokio::test]
    async fn test_value_file_overrides_shallower_config_entry() {
        let project = TestProject::new();
        project
            .json(
                "/+config.json",
                json!({ "meta": { "title": { "env": "config-only" } }, "title": "Root" }),
            )
            .touch("/pages/blog/+Page.js")
            .json("/pages/blog/+title.json", json!("Blog"));

        let data = resolve(&project).await.unwrap();
        let title = &data.page("/pages/blog").unwrap().elements["title"];

        assert_eq!(title.value, ConfigValue::Literal { value: json!("Blog") });
        assert_eq!(title.defined_at, "/pages/blog/+title.json > `export default`");
        assert_eq!(title.env, ConfigEnv::ConfigOnly);
    }

    #[tokio::test]
    async fn test_renderer_directory_governs_parent() {
        let project = TestProject::new();
        project
            .touch("/pages/+Page.js")
            .touch("/renderer/+onRenderHtml.js")
            .touch("/pages/admin/+Page.js")
            .touch("/pages/admin/renderer/+onRenderHtml.js");

        let data = resolve(&project).await.unwrap();
        assert_eq!(
            data.page("/pages").unwrap().elements["onRenderHtml"].value,
            reference("/renderer/+onRenderHtml.js", "default")
        );
        assert_eq!(
            data.page("/pages/admin").unwrap().elements["onRenderHtml"].value,
            reference("/pages/admin/renderer/+onRenderHtml.js", "default")
        );
    }
}

mod reference_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_named_import_reference() {
        let project = TestProject::new();
        project
            .json(
                "/+config.json",
                json!({
                    "meta": { "Layout": { "env": "server-and-client", "requiresCodeFile": true } },
                    "Layout": "import:./layouts/Main.js:Layout"
                }),
            )
            .touch("/layouts/Main.js")
            .touch("/pages/+Page.js");

        let data = resolve(&project).await.unwrap();
        let layout = &data.page("/pages").unwrap().elements["Layout"];

        assert_eq!(layout.value, reference("/layouts/Main.js", "Layout"));
        assert_eq!(layout.env, ConfigEnv::ServerAndClient);
        assert_eq!(layout.declared_in.as_deref(), Some("/+config.json"));
        assert!(project.path("/layouts/Main.js").exists());
    }

    #[tokio::test]
    async fn test_extension_probing() {
        let project = TestProject::new();
        project
            .json("/pages/+config.json", json!({ "Page": "./Page" }))
            .touch("/pages/Page.tsx");

        let data = resolve(&project).await.unwrap();
        assert_eq!(
            data.page("/pages").unwrap().elements["Page"].value,
            reference("/pages/Page.tsx", "default")
        );
    }

    #[tokio::test]
    async fn test_missing_code_file_is_usage_error() {
        let project = TestProject::new();
        project.json("/pages/+config.json", json!({ "Page": "./Missing.js" }));

        let err = resolve(&project).await.unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("'./Missing.js'"));
    }

    #[tokio::test]
    async fn test_literal_for_code_config_is_usage_error() {
        let project = TestProject::new();
        project.json("/pages/+config.json", json!({ "Page": { "component": "Home" } }));

        let err = resolve(&project).await.unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("`object`"));
    }
}

mod definition_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_unknown_config_suggests_closest() {
        let project = TestProject::new();
        project.json(
            "/pages/+config.json",
            json!({ "Page": "./Page.js", "passToClinet": ["user"] }),
        );
        project.touch("/pages/Page.js");

        let err = resolve(&project).await.unwrap_err();
        assert!(err.is_usage());
        assert!(
            err.to_string()
                .ends_with("did you mean to define 'passToClient' instead?"),
            "{err}"
        );
    }

    #[tokio::test]
    async fn test_unknown_value_file_name() {
        let project = TestProject::new();
        project.touch("/pages/+Page.js").touch("/pages/+Gaurd.js");

        let err = resolve(&project).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Meta(plus_meta::Error::UnknownConfig { ref suggestion, .. })
                if suggestion.as_deref() == Some("guard")
        ));
    }

    #[tokio::test]
    async fn test_unknown_value_file_outside_pages() {
        let project = TestProject::new();
        project.touch("/pages/+Page.js").touch("/components/+Gaurd.js");

        let err = resolve(&project).await.unwrap_err();
        assert!(err.is_usage());
        let message = err.to_string();
        assert!(message.contains("/components/+Gaurd.js"), "{message}");
        assert!(message.ends_with("did you mean to define 'guard' instead?"), "{message}");
    }

    #[tokio::test]
    async fn test_misspelled_page_file_is_not_ignored() {
        let project = TestProject::new();
        project.touch("/pages/about/+Pgae.js");

        let err = resolve(&project).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Meta(plus_meta::Error::UnknownConfig { ref name, ref suggestion, .. })
                if name == "Pgae" && suggestion.as_deref() == Some("Page")
        ));
    }

    #[tokio::test]
    async fn test_value_file_named_by_nested_meta_is_known() {
        let project = TestProject::new();
        project
            .json(
                "/pages/admin/+config.json",
                json!({ "meta": { "adminRole": { "env": "config-only" } } }),
            )
            .touch("/pages/admin/+Page.js")
            .json("/pages/admin/+adminRole.json", json!("owner"));

        let data = resolve(&project).await.unwrap();
        let role = &data.page("/pages/admin").unwrap().elements["adminRole"];
        assert_eq!(role.value, ConfigValue::Literal { value: json!("owner") });
    }

    #[tokio::test]
    async fn test_nested_meta_applies_to_subtree_only() {
        let project = TestProject::new();
        project
            .json(
                "/pages/admin/+config.json",
                json!({
                    "meta": { "adminRole": { "env": "server-only" } },
                    "adminRole": "owner"
                }),
            )
            .touch("/pages/admin/+Page.js")
            .json("/pages/blog/+config.json", json!({ "adminRole": "reader" }))
            .touch("/pages/blog/+Page.js");

        let err = resolve(&project).await.unwrap_err();
        assert!(err.to_string().contains("unknown config 'adminRole'"), "{err}");
        assert!(err.to_string().contains("/pages/blog/+config.json"), "{err}");
    }

    #[tokio::test]
    async fn test_validation_runs_on_literals() {
        let project = TestProject::new();
        project
            .json("/pages/+config.json", json!({ "clientRouting": "yes" }))
            .touch("/pages/+Page.js");

        let err = resolve(&project).await.unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("it should be a boolean instead"));
    }

    #[tokio::test]
    async fn test_root_definitions_include_meta() {
        let project = TestProject::new();
        project.json(
            "/+config.json",
            json!({ "meta": { "title": { "env": "server-and-client" } } }),
        );

        let options = ResolveOptions::new(project.root());
        let definitions = load_root_definitions(&options, &StaticModuleLoader::new(), &Warnings::new())
            .await
            .unwrap();
        assert_eq!(definitions.get("title").unwrap().env, ConfigEnv::ServerAndClient);
        assert!(definitions.contains("Page"));
    }
}

mod effect_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_ssr_false_moves_page_to_client() {
        let project = TestProject::new();
        project
            .json("/pages/+config.json", json!({ "ssr": true }))
            .touch("/pages/+Page.js")
            .json("/pages/spa/+config.json", json!({ "ssr": false }))
            .touch("/pages/spa/+Page.js");

        let data = resolve(&project).await.unwrap();
        assert_eq!(
            data.page("/pages").unwrap().elements["Page"].env,
            ConfigEnv::ServerAndClient
        );
        assert_eq!(
            data.page("/pages/spa").unwrap().elements["Page"].env,
            ConfigEnv::ClientOnly
        );
    }

    #[tokio::test]
    async fn test_ssr_value_file_is_loaded() {
        let project = TestProject::new();
        project
            .touch("/pages/+Page.js")
            .write("/pages/+ssr.yaml", "false\n");

        let data = resolve(&project).await.unwrap();
        let page = data.page("/pages").unwrap();
        assert_eq!(page.elements["ssr"].value, ConfigValue::Literal { value: json!(false) });
        assert_eq!(page.elements["Page"].env, ConfigEnv::ClientOnly);
    }
}

mod page_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_routes_from_filesystem() {
        let project = TestProject::new();
        project
            .touch("/pages/index/+Page.js")
            .touch("/pages/(marketing)/pricing/+Page.js")
            .touch("/pages/product/+route.js")
            .touch("/pages/product/+Page.js");

        let data = resolve(&project).await.unwrap();
        let routes: Vec<(&str, Option<&str>)> = data
            .pages
            .iter()
            .map(|p| (p.page_id.as_str(), p.route_filesystem.as_deref()))
            .collect();
        assert_eq!(
            routes,
            vec![
                ("/pages/(marketing)/pricing", Some("/pricing")),
                ("/pages/index", Some("/")),
                ("/pages/product", Some("/product")),
            ]
        );
    }

    #[tokio::test]
    async fn test_error_page_has_no_route() {
        let project = TestProject::new();
        project.touch("/pages/_error/+Page.js");

        let data = resolve(&project).await.unwrap();
        let page = data.page("/pages/_error").unwrap();
        assert!(page.is_error_page);
        assert_eq!(page.route_filesystem, None);
        assert_eq!(page.route_filesystem_defined_by, "/pages/_error/+Page.js");
    }

    #[tokio::test]
    async fn test_configs_without_pages() {
        let project = TestProject::new();
        project.json("/renderer/+config.json", json!({ "passToClient": ["user"] }));

        let data = resolve(&project).await.unwrap();
        assert!(data.pages.is_empty());
    }
}

mod global_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_global_at_nested_scope_fails_without_root_file() {
        let project = TestProject::new();
        project
            .json("/pages/admin/+config.json", json!({ "baseServer": "/admin" }))
            .touch("/pages/admin/+Page.js");

        let err = resolve(&project).await.unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("which is global"));
        assert!(err.to_string().contains("create a global config"));
    }

    #[tokio::test]
    async fn test_global_values_and_hooks() {
        let project = TestProject::new();
        project
            .json("/+config.json", json!({ "baseServer": "/app", "prerender": true }))
            .touch("/renderer/+onBeforeRoute.js")
            .touch("/pages/+Page.js");

        let options = ResolveOptions::load(project.root()).unwrap();
        let warnings = Warnings::new();
        let data = load_config_data(&options, &StaticModuleLoader::new(), &warnings)
            .await
            .unwrap();

        assert_eq!(data.project_settings.get("baseServer"), Some(&json!("/app")));
        assert!(!data.project_settings.contains_key("prerender"));
        assert_eq!(
            data.global.on_before_route.as_ref().unwrap().value,
            reference("/renderer/+onBeforeRoute.js", "default")
        );
        assert!(!data.page("/pages").unwrap().elements.contains_key("onBeforeRoute"));
        assert_eq!(
            data.page("/pages").unwrap().elements["prerender"].value,
            ConfigValue::Literal { value: json!(true) }
        );

        let emitted = warnings.emitted();
        assert_eq!(emitted.len(), 1);
        assert!(emitted[0].contains("'baseServer'"));
        assert!(emitted[0].contains("experimental"));
    }
}

mod collection_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_broken_config_file_aborts_pass() {
        let project = TestProject::new();
        project
            .touch("/pages/+Page.js")
            .write("/pages/about/+config.json", "{ not json");

        let err = resolve(&project).await.unwrap_err();
        assert!(!err.is_usage());
        assert!(matches!(err, Error::Load { ref path, .. } if path == "/pages/about/+config.json"));
    }

    #[tokio::test]
    async fn test_settings_ignore_directories() {
        let project = TestProject::new();
        project
            .settings("ignore = [\"legacy\"]\n")
            .touch("/pages/+Page.js")
            .json("/legacy/+config.json", json!({ "Page": 42 }))
            .json("/node_modules/pkg/+config.json", json!({ "Page": 42 }));

        let data = resolve(&project).await.unwrap();
        assert_eq!(data.pages.len(), 1);
    }

    #[tokio::test]
    async fn test_extension_config_files() {
        let project = TestProject::new();
        project.touch("/pages/+Page.js");
        let addon = TestProject::new();
        addon.json("/dist/+config.json", json!({ "passToClient": ["user"] }));

        let extension = Extension {
            name: "ui-kit".to_string(),
            config_files: vec![
                ExtensionConfigFile {
                    import_path: "/renderer/+config.json".to_string(),
                    file_path: addon.path("/dist/+config.json").display().to_string(),
                },
                ExtensionConfigFile {
                    import_path: "/renderer/config.json".to_string(),
                    file_path: addon.path("/dist/config.json").display().to_string(),
                },
            ],
        };
        let options = ResolveOptions::new(project.root()).with_extension(extension);
        let data = load_config_data(&options, &StaticModuleLoader::new(), &Warnings::new())
            .await
            .unwrap();

        let pass_to_client = &data.page("/pages").unwrap().elements["passToClient"];
        assert_eq!(pass_to_client.value, ConfigValue::Literal { value: json!(["user"]) });
        assert_eq!(pass_to_client.defined_by_file, "/renderer/+config.json");
    }

    #[tokio::test]
    async fn test_missing_root() {
        let project = TestProject::new();
        let options = ResolveOptions::new(project.path("/does-not-exist"));
        let err = load_config_data(&options, &StaticModuleLoader::new(), &Warnings::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fs(plus_fs::Error::RootNotFound { .. })));
    }

    #[tokio::test]
    async fn test_serializes_to_json() {
        let project = TestProject::new();
        project
            .json("/pages/+config.json", json!({ "Page": "./Page.js", "passToClient": ["user"] }))
            .touch("/pages/Page.js");

        let data = resolve(&project).await.unwrap();
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["pages"][0]["page_id"], "/pages");
        assert_eq!(value["pages"][0]["elements"]["Page"]["kind"], "code_reference");
        assert_eq!(value["pages"][0]["elements"]["passToClient"]["kind"], "literal");
        assert_eq!(value["pages"][0]["elements"]["passToClient"]["value"], json!(["user"]));
    }
}
