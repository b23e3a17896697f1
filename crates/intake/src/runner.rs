//! Executes one CLI command against a fresh page.
//!
//! Every invocation behaves like a page load: the store is opened, the page
//! receives `Loaded` and the option fetch runs before the command itself.

use std::path::Path;
use std::sync::Arc;

use color_eyre::{
    Result,
    eyre::{WrapErr, bail},
};
use enrollment::{
    EmbeddedOptionSource, Effect, EnrollmentPage, Event, FileOptionSource, FormState,
    HttpOptionSource, OptionLoadError, OptionSource, ValidationContext, load_options,
};
use serde_json::{Map, Value};
use store::{FileStore, KeyValueStore};
use tracing::{debug, info};

use crate::cli::{Cli, Cmd, GlobalOpts};
use crate::config::Config;

/// Option source picked from flags and configuration.
pub enum ConfiguredSource {
    Http(HttpOptionSource),
    File(FileOptionSource),
    Embedded(EmbeddedOptionSource),
}

impl ConfiguredSource {
    /// Flags win over configuration; nothing configured means the bundled list,
    /// which a `states.html` in `resources_dir` replaces.
    pub fn resolve(global: &GlobalOpts, config: &Config, resources_dir: &Path) -> Self {
        if let Some(url) = &global.options_url {
            Self::Http(HttpOptionSource::new(url.clone()))
        } else if let Some(path) = &global.options_file {
            Self::File(FileOptionSource::new(path.clone()))
        } else if let Some(url) = &config.options_url {
            Self::Http(HttpOptionSource::new(url.clone()))
        } else if let Some(path) = &config.options_file {
            Self::File(FileOptionSource::new(path.clone()))
        } else {
            Self::Embedded(EmbeddedOptionSource::states().with_override_dir(resources_dir))
        }
    }
}

impl OptionSource for ConfiguredSource {
    async fn fetch(&self) -> Result<String, OptionLoadError> {
        match self {
            Self::Http(source) => source.fetch().await,
            Self::File(source) => source.fetch().await,
            Self::Embedded(source) => source.fetch().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Http(source) => source.describe(),
            Self::File(source) => source.describe(),
            Self::Embedded(source) => source.describe(),
        }
    }
}

pub async fn run(args: Cli, config: Config, resources_dir: &Path) -> Result<()> {
    let store_file = args
        .global
        .store
        .clone()
        .unwrap_or_else(|| config.store_file.clone());
    let store: Arc<dyn KeyValueStore> = Arc::new(
        FileStore::builder()
            .with_store_file(&store_file)
            .build()
            .wrap_err_with(|| format!("opening store {}", store_file.display()))?,
    );
    let source = ConfiguredSource::resolve(&args.global, &config, resources_dir);
    let ctx = ValidationContext::today();

    if let Cmd::Options = args.cmd {
        for option in load_options(&source).await.into_records() {
            let marker = if option.disabled { " (disabled)" } else { "" };
            println!("{:>4}  {}{marker}", option.value, option.label);
        }
        return Ok(());
    }

    let mut page = EnrollmentPage::with_form(store, FormState::enrollment(), config.field_ttl());
    let leftover = page.load(&source, &ctx).await;
    debug!(?leftover, "page loaded");

    match args.cmd {
        Cmd::Set { control, value } => {
            if page.form().control(&control).is_none() {
                bail!("unknown control `{control}`");
            }
            page.handle(Event::InputChanged { control, value }, &ctx);
        }
        Cmd::Check { input, json } => {
            fill(&mut page, input.as_deref(), &ctx)?;
            let effects = page.handle(Event::ValidateRequested, &ctx);
            debug!(?effects, "validated");
            let Some(report) = page.last_report().cloned() else {
                bail!("validation did not run");
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for outcome in report.failures() {
                    println!("{:?}: {}", outcome.field, outcome.message);
                }
            }
            if !report.submittable {
                bail!("{} field(s) invalid", report.failures().count());
            }
            let submitted = page
                .handle(Event::SubmitAttempted, &ctx)
                .iter()
                .any(|e| matches!(e, Effect::Submit(_)));
            if submitted {
                info!("form accepted");
                println!("Form is valid.");
            }
        }
        Cmd::Review { input, json } => {
            fill(&mut page, input.as_deref(), &ctx)?;
            page.handle(Event::ReviewRequested, &ctx);
            if let Some(table) = page.review() {
                if json {
                    println!("{}", serde_json::to_string_pretty(table)?);
                } else {
                    print!("{table}");
                }
            }
        }
        Cmd::Greet => {
            if let Some(greeting) = page.greeting() {
                println!("{}\n{}", greeting.welcome, greeting.disclaim);
            }
        }
        Cmd::Forget => {
            let effects = page.handle(Event::DisclaimIdentity, &ctx);
            if effects.contains(&Effect::Reload) {
                println!("Remembered fields cleared.");
            } else {
                println!("Nothing remembered.");
            }
        }
        Cmd::Options => {}
    }

    Ok(())
}

/// Apply a JSON object of control id -> value as user input.
fn fill(page: &mut EnrollmentPage, input: Option<&Path>, ctx: &ValidationContext) -> Result<()> {
    let Some(path) = input else {
        return Ok(());
    };
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading {}", path.display()))?;
    let values: Map<String, Value> =
        serde_json::from_str(&text).wrap_err("input must be a JSON object")?;

    for event in input_events(values)? {
        page.handle(event, ctx);
    }
    Ok(())
}

fn input_events(values: Map<String, Value>) -> Result<Vec<Event>> {
    values
        .into_iter()
        .map(|(control, value)| match value {
            Value::Bool(checked) => Ok(Event::Toggled { control, checked }),
            Value::String(value) => Ok(Event::InputChanged { control, value }),
            Value::Number(n) => Ok(Event::InputChanged {
                control,
                value: n.to_string(),
            }),
            other => bail!("unsupported value for `{control}`: {other}"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn json_values_become_events() {
        let Value::Object(map) = json!({ "city": "Houston", "female": true, "zipcode": 77001 })
        else {
            unreachable!()
        };
        let mut events = input_events(map).unwrap();
        events.sort_by_key(|e| format!("{e:?}"));

        assert_eq!(
            events,
            vec![
                Event::InputChanged {
                    control: "city".into(),
                    value: "Houston".into()
                },
                Event::InputChanged {
                    control: "zipcode".into(),
                    value: "77001".into()
                },
                Event::Toggled {
                    control: "female".into(),
                    checked: true
                },
            ]
        );
    }

    #[test]
    fn nested_values_are_rejected() {
        let Value::Object(map) = json!({ "city": ["a"] }) else {
            unreachable!()
        };
        assert!(input_events(map).is_err());
    }

    #[test]
    fn flags_take_precedence_over_config() {
        let config = Config {
            store_file: "s.ron".into(),
            options_url: Some("https://example.test/states.html".into()),
            options_file: None,
            field_ttl_days: 30,
        };
        let global = GlobalOpts {
            options_file: Some("local.html".into()),
            ..GlobalOpts::default()
        };
        let resources = Path::new("resources");
        assert!(matches!(
            ConfiguredSource::resolve(&global, &config, resources),
            ConfiguredSource::File(_)
        ));
        assert!(matches!(
            ConfiguredSource::resolve(&GlobalOpts::default(), &config, resources),
            ConfiguredSource::Http(_)
        ));
    }

    #[tokio::test]
    async fn bundled_list_honours_resource_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("states.html"),
            r#"<option value="PR">Puerto Rico</option>"#,
        )
        .unwrap();
        let config = Config {
            store_file: "s.ron".into(),
            options_url: None,
            options_file: None,
            field_ttl_days: 30,
        };

        let source = ConfiguredSource::resolve(&GlobalOpts::default(), &config, dir.path());
        assert!(matches!(source, ConfiguredSource::Embedded(_)));
        let records = load_options(&source).await.into_records();
        assert_eq!(records, vec![enrollment::OptionRecord::new("PR", "Puerto Rico")]);
    }
}
