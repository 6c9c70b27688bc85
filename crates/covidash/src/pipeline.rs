//! One dashboard run: load, validate, build every section, write output.

use crate::error::{AppError, AppResult};
use crate::params::{DashboardParams, ValidationIssue, WidgetInput};
use crate::provider::DataProvider;
use crate::sections;
use covidash_charts::{ChartError, ChartRenderer, ChartSpec};
use covidash_config::{Config, OutputConfig, WidgetsConfig};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Sections processed.
    pub sections: usize,
    /// Charts produced, placeholders included.
    pub charts: usize,
    /// Sections replaced by a placeholder.
    pub placeholders: usize,
    /// Chart specs written as JSON.
    pub specs_written: usize,
    /// Images rendered.
    pub images_written: usize,
    /// Charts the renderer cannot draw; only their spec was written.
    pub images_skipped: usize,
    /// Renders that failed.
    pub render_failures: usize,
    /// Invalid widget values.
    pub issues: Vec<ValidationIssue>,
}

/// Dashboard pipeline over a data provider and a renderer.
pub struct Dashboard {
    provider: Arc<dyn DataProvider>,
    renderer: Arc<dyn ChartRenderer>,
    output: OutputConfig,
    widgets: WidgetsConfig,
}

impl Dashboard {
    /// Creates a pipeline using the output and widget sections of `config`.
    #[must_use]
    pub fn new(
        config: &Config,
        provider: Arc<dyn DataProvider>,
        renderer: Arc<dyn ChartRenderer>,
    ) -> Self {
        Self {
            provider,
            renderer,
            output: config.output.clone(),
            widgets: config.widgets.clone(),
        }
    }

    /// Runs every section once, in dashboard order.
    ///
    /// # Errors
    ///
    /// Fails when the dataset cannot be loaded or an output file cannot be
    /// written. Invalid widget values and renderer failures are not errors;
    /// they are counted in the summary.
    #[instrument(skip_all, fields(source = %self.provider.describe()))]
    pub async fn run(&self, input: &WidgetInput) -> AppResult<RunSummary> {
        let table = self.provider.load().await?;
        let resolved = DashboardParams::resolve(input, &table, &self.widgets);
        for issue in &resolved.issues {
            warn!(field = issue.field, message = %issue.message, "Invalid widget value");
        }

        if self.output.write_specs || self.output.write_images {
            tokio::fs::create_dir_all(&self.output.dir)
                .await
                .map_err(|e| AppError::output(&self.output.dir, e))?;
            self.remove_previous_outputs().await?;
        }

        let mut summary = RunSummary {
            issues: resolved.issues.clone(),
            ..RunSummary::default()
        };

        for section in sections::all() {
            let blocking = resolved.issues_for(section.depends_on());
            let specs = if blocking.is_empty() {
                section.build(&table, &resolved.params)
            } else {
                summary.placeholders += 1;
                vec![sections::placeholder(section.as_ref(), &blocking)]
            };
            debug!(section = section.name(), charts = specs.len(), "Built section");

            summary.sections += 1;
            for (i, spec) in specs.iter().enumerate() {
                self.emit(&format!("{}-{}", section.name(), i + 1), spec, &mut summary)
                    .await?;
            }
        }

        info!(
            charts = summary.charts,
            specs = summary.specs_written,
            images = summary.images_written,
            placeholders = summary.placeholders,
            failures = summary.render_failures,
            issues = summary.issues.len(),
            "Dashboard run complete"
        );
        Ok(summary)
    }

    /// Deletes chart files a previous run left in the output directory, so a
    /// section that now yields fewer charts leaves no outdated extras.
    async fn remove_previous_outputs(&self) -> AppResult<()> {
        let dir = &self.output.dir;
        let names: Vec<&'static str> = sections::all().iter().map(|s| s.name()).collect();
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| AppError::output(dir, e))?;

        let mut removed = 0usize;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AppError::output(dir, e))?
        {
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if is_chart_output(file_name, &names) {
                let path = entry.path();
                tokio::fs::remove_file(&path)
                    .await
                    .map_err(|e| AppError::output(&path, e))?;
                removed += 1;
            }
        }
        if removed > 0 {
            debug!(removed, dir = %dir.display(), "Removed previous chart files");
        }
        Ok(())
    }

    async fn emit(&self, stem: &str, spec: &ChartSpec, summary: &mut RunSummary) -> AppResult<()> {
        summary.charts += 1;

        if self.output.write_specs {
            let path = self.output.dir.join(format!("{stem}.json"));
            let json = serde_json::to_vec_pretty(spec)?;
            tokio::fs::write(&path, json)
                .await
                .map_err(|e| AppError::output(&path, e))?;
            summary.specs_written += 1;
        }

        if self.output.write_images {
            let path = self.output.dir.join(format!("{stem}.png"));
            match self.renderer.render(spec, &path).await {
                Ok(()) => summary.images_written += 1,
                Err(ChartError::Unsupported { kind, renderer }) => {
                    info!(chart = stem, %kind, renderer, "Kind not drawable, spec only");
                    summary.images_skipped += 1;
                }
                Err(err) => {
                    warn!(chart = stem, error = %err, "Rendering failed");
                    summary.render_failures += 1;
                }
            }
        }
        Ok(())
    }
}

/// Whether `file_name` has the `<section>-<n>.json` or `<section>-<n>.png`
/// shape of a chart file.
fn is_chart_output(file_name: &str, sections: &[&str]) -> bool {
    let Some((stem, extension)) = file_name.rsplit_once('.') else {
        return false;
    };
    if extension != "json" && extension != "png" {
        return false;
    }
    let Some((section, index)) = stem.rsplit_once('-') else {
        return false;
    };
    sections.contains(&section) && !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockDataProvider;
    use async_trait::async_trait;
    use covidash_charts::ChartKind;
    use covidash_common::test_utils::dataset_fixtures::sample_observations;
    use covidash_common::DashError;
    use covidash_engine::Table;
    use std::path::Path;
    use std::sync::Mutex;

    /// Records render calls; pies fail, maps are unsupported.
    #[derive(Default)]
    struct StubRenderer {
        rendered: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChartRenderer for StubRenderer {
        async fn render(&self, spec: &ChartSpec, path: &Path) -> Result<(), ChartError> {
            match spec.kind {
                ChartKind::Pie => Err(ChartError::Drawing("font missing".to_string())),
                ChartKind::Choropleth => Err(ChartError::Unsupported {
                    kind: spec.kind,
                    renderer: "stub",
                }),
                _ => {
                    let name = path.file_name().unwrap().to_string_lossy().into_owned();
                    self.rendered.lock().unwrap().push(name);
                    Ok(())
                }
            }
        }

        fn supports(&self, kind: ChartKind) -> bool {
            kind != ChartKind::Choropleth
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    fn provider() -> MockDataProvider {
        let mut mock = MockDataProvider::new();
        mock.expect_load()
            .times(1)
            .returning(|| Ok(Table::new(sample_observations())));
        mock.expect_describe().return_const("fixture".to_string());
        mock
    }

    fn config(dir: &Path, write_images: bool) -> Config {
        let mut config = Config::default();
        config.output.dir = dir.to_path_buf();
        config.output.write_images = write_images;
        config
    }

    #[tokio::test]
    async fn test_run_writes_every_spec() {
        let dir = tempfile::tempdir().unwrap();
        let dashboard = Dashboard::new(
            &config(dir.path(), false),
            Arc::new(provider()),
            Arc::new(StubRenderer::default()),
        );

        let summary = dashboard.run(&WidgetInput::default()).await.unwrap();
        assert_eq!(summary.sections, 7);
        assert_eq!(summary.charts, 9);
        assert_eq!(summary.specs_written, 9);
        assert_eq!(summary.images_written, 0);
        assert_eq!(summary.placeholders, 0);
        assert!(dir.path().join("country_comparison-3.json").exists());
        assert!(dir.path().join("world_map-1.json").exists());
        assert!(!dir.path().join("global_trend-1.png").exists());
    }

    #[tokio::test]
    async fn test_renderer_failures_are_counted_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = Arc::new(StubRenderer::default());
        let dashboard = Dashboard::new(
            &config(dir.path(), true),
            Arc::new(provider()),
            renderer.clone(),
        );

        let summary = dashboard.run(&WidgetInput::default()).await.unwrap();
        assert_eq!(summary.images_written, 5);
        assert_eq!(summary.render_failures, 3);
        assert_eq!(summary.images_skipped, 1);
        assert_eq!(renderer.rendered.lock().unwrap()[0], "global_trend-1.png");
    }

    #[tokio::test]
    async fn test_invalid_input_blocks_only_its_section() {
        let dir = tempfile::tempdir().unwrap();
        let dashboard = Dashboard::new(
            &config(dir.path(), false),
            Arc::new(provider()),
            Arc::new(StubRenderer::default()),
        );
        let input = WidgetInput {
            top_n: Some(50),
            ..WidgetInput::default()
        };

        let summary = dashboard.run(&input).await.unwrap();
        assert_eq!(summary.placeholders, 1);
        assert_eq!(summary.issues.len(), 1);
        assert_eq!(summary.charts, 9);

        let json = std::fs::read_to_string(dir.path().join("top_countries-1.json")).unwrap();
        let spec: ChartSpec = serde_json::from_str(&json).unwrap();
        assert!(spec.frame.is_empty());
        assert!(spec.title.contains("top_n: 50 is outside 5..=20"));
    }

    #[tokio::test]
    async fn test_rerun_drops_charts_of_shrunken_section() {
        let dir = tempfile::tempdir().unwrap();
        let dashboard = |mock| {
            Dashboard::new(
                &config(dir.path(), false),
                Arc::new(mock),
                Arc::new(StubRenderer::default()),
            )
        };
        std::fs::write(dir.path().join("notes.txt"), "keep").unwrap();

        dashboard(provider()).run(&WidgetInput::default()).await.unwrap();
        assert!(dir.path().join("country_comparison-3.json").exists());

        let input = WidgetInput {
            country1: Some("Atlantis".to_string()),
            ..WidgetInput::default()
        };
        let summary = dashboard(provider()).run(&input).await.unwrap();
        assert_eq!(summary.placeholders, 1);
        assert!(dir.path().join("country_comparison-1.json").exists());
        assert!(!dir.path().join("country_comparison-2.json").exists());
        assert!(!dir.path().join("country_comparison-3.json").exists());
        assert!(dir.path().join("notes.txt").exists());
    }

    #[test]
    fn test_chart_output_names() {
        let names = ["global_trend", "country_comparison"];
        assert!(is_chart_output("global_trend-1.json", &names));
        assert!(is_chart_output("country_comparison-12.png", &names));
        assert!(!is_chart_output("global_trend-1.txt", &names));
        assert!(!is_chart_output("global_trend-x.json", &names));
        assert!(!is_chart_output("global_trend-.png", &names));
        assert!(!is_chart_output("world-1.json", &names));
        assert!(!is_chart_output("summary.json", &names));
    }

    #[tokio::test]
    async fn test_provider_error_is_fatal() {
        let mut mock = MockDataProvider::new();
        mock.expect_load()
            .returning(|| Err(DashError::dataset("truncated file")));
        mock.expect_describe().return_const("broken".to_string());

        let dir = tempfile::tempdir().unwrap();
        let dashboard = Dashboard::new(
            &config(dir.path(), false),
            Arc::new(mock),
            Arc::new(StubRenderer::default()),
        );
        let err = dashboard.run(&WidgetInput::default()).await.unwrap_err();
        assert!(matches!(err, AppError::Data(DashError::Dataset { .. })));
    }
}
