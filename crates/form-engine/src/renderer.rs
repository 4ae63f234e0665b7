//! Form rendering
//!
//! [`FormRenderer`] turns validated [`FormData`] into a document: it computes
//! the form's geometry, resolves the images the data references, builds the
//! template inputs and compiles the embedded template.

use std::collections::HashMap;
use std::path::Path;

use serde_json::{json, Value};
use typst::foundations::Bytes;

use crate::assets::{AssetSource, DirectoryAssets, MemoryAssets, NoAssets};
use crate::compiler::{
    compile_document_sync, CompileError, EngineError, OutputFormat, PreparedDocument,
    RenderResponse, RenderStatus,
};
use crate::config::EngineConfig;
use crate::forms::{FormData, FormKind};
use crate::layout::{FuelCardLayout, GatePassLayout};
use crate::templates::get_template_source;
use crate::world::{asset_path, init_global_font_cache};

/// Per-render options
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// PNG resolution, 144 when unset
    pub ppi: Option<u32>,
    /// Images supplied with the request; they shadow the configured source
    pub assets: MemoryAssets,
}

impl RenderOptions {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn with_assets(mut self, assets: MemoryAssets) -> Self {
        self.assets = assets;
        self
    }

    pub fn with_ppi(mut self, ppi: u32) -> Self {
        self.ppi = Some(ppi);
        self
    }
}

/// A rendered form
#[derive(Debug, Clone)]
pub struct RenderedForm {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub page_count: usize,
    pub warnings: Vec<CompileError>,
}

/// Renders forms with one configuration and asset source
pub struct FormRenderer {
    config: EngineConfig,
    assets: Box<dyn AssetSource>,
}

impl FormRenderer {
    /// Create a renderer reading images from `config.assets_dir`, if set
    pub fn new(config: EngineConfig) -> Self {
        let assets: Box<dyn AssetSource> = match &config.assets_dir {
            Some(dir) => Box::new(DirectoryAssets::new(dir.clone())),
            None => Box::new(NoAssets),
        };
        Self::build(config, assets)
    }

    /// Create a renderer with an explicit asset source
    pub fn with_assets(config: EngineConfig, assets: impl AssetSource + 'static) -> Self {
        Self::build(config, Box::new(assets))
    }

    fn build(config: EngineConfig, assets: Box<dyn AssetSource>) -> Self {
        let fonts = init_global_font_cache(&config.font_dirs);
        for family in &config.fonts {
            if !fonts.has_family(family) {
                tracing::warn!("Font family '{}' not found, Typst will fall back", family);
            }
        }
        Self { config, assets }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build the document for `form` without compiling it
    pub fn prepare(
        &self,
        form: &FormData,
        options: &RenderOptions,
    ) -> Result<PreparedDocument, EngineError> {
        let kind = form.kind();
        let source = get_template_source(kind.name())?;

        let mut assets: HashMap<String, Bytes> = HashMap::new();
        for name in form.asset_refs() {
            let data = self.load_asset(&name, options)?;
            assets.insert(asset_path(&name), data);
        }

        let logo = match &self.config.logo {
            Some(name) => {
                let data = self.load_asset(name, options)?;
                let path = asset_path(name);
                assets.insert(path.clone(), data);
                Value::String(path)
            }
            None => Value::Null,
        };

        let mut inputs = HashMap::new();
        inputs.insert("form".to_string(), form.to_template_value()?);
        inputs.insert("layout".to_string(), self.layout(kind)?);
        inputs.insert("organization".to_string(), json!(self.config.organization));
        inputs.insert("currency".to_string(), json!(self.config.currency));
        inputs.insert("fonts".to_string(), json!(self.config.fonts));
        inputs.insert("logo".to_string(), logo);

        Ok(PreparedDocument {
            source: source.to_string(),
            inputs,
            assets,
            format: options.format,
            ppi: options.ppi,
        })
    }

    /// Render `form` in `format` using only the configured assets
    pub fn render(
        &self,
        form: &FormData,
        format: OutputFormat,
    ) -> Result<RenderedForm, EngineError> {
        self.render_with(form, &RenderOptions::new(format))
    }

    /// Render `form` on the current thread
    pub fn render_with(
        &self,
        form: &FormData,
        options: &RenderOptions,
    ) -> Result<RenderedForm, EngineError> {
        let document = self.prepare(form, options)?;
        let response = compile_document_sync(document)?;
        into_rendered(form.kind(), response)
    }

    /// Render `form` to `path`, choosing the format from its extension
    pub fn render_to_file(
        &self,
        form: &FormData,
        path: &Path,
    ) -> Result<RenderedForm, EngineError> {
        let format = OutputFormat::from_path(path).ok_or_else(|| {
            EngineError::InvalidArgument(format!(
                "Cannot tell the output format from '{}'; use .pdf, .svg or .png",
                path.display()
            ))
        })?;

        let rendered = self.render(form, format)?;
        std::fs::write(path, &rendered.bytes)?;
        tracing::info!(
            "Wrote {} ({} bytes, {} page(s))",
            path.display(),
            rendered.bytes.len(),
            rendered.page_count
        );
        Ok(rendered)
    }

    /// Render `form` on the blocking pool, failing after the configured timeout
    #[cfg(feature = "server")]
    pub async fn render_with_timeout(
        &self,
        form: &FormData,
        options: &RenderOptions,
    ) -> Result<RenderedForm, EngineError> {
        let document = self.prepare(form, options)?;
        let response = crate::compiler::compile_document(document, self.config.timeout_ms).await?;
        into_rendered(form.kind(), response)
    }

    fn layout(&self, kind: FormKind) -> Result<Value, EngineError> {
        let show = self.config.show_frame_boundaries;
        let layout = match kind {
            FormKind::FuelCard => serde_json::to_value(FuelCardLayout::compute(show)?)?,
            FormKind::GatePass => serde_json::to_value(GatePassLayout::compute()?)?,
        };
        Ok(layout)
    }

    fn load_asset(&self, name: &str, options: &RenderOptions) -> Result<Bytes, EngineError> {
        if options.assets.contains(name) {
            options.assets.load(name)
        } else {
            self.assets.load(name)
        }
    }
}

fn into_rendered(kind: FormKind, response: RenderResponse) -> Result<RenderedForm, EngineError> {
    if response.status == RenderStatus::Error {
        tracing::error!("{} failed to compile: {} error(s)", kind, response.errors.len());
        return Err(EngineError::CompileError(response.errors));
    }

    let artifact = response
        .artifact
        .ok_or_else(|| EngineError::ExportError("Compilation produced no output".to_string()))?;

    tracing::debug!(
        form = %kind,
        pages = artifact.page_count,
        warnings = response.warnings.len(),
        "Rendered form"
    );

    Ok(RenderedForm {
        bytes: artifact.data,
        mime_type: artifact.mime_type,
        page_count: artifact.page_count,
        warnings: response.warnings,
    })
}
