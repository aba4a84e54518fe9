use clap::Parser;
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ngb_vcf::{
    Config,
    config::Command,
    render::{
        CachedTrackRenderer, ReferenceBlock, ReferenceConfig, ReferenceRenderer, Surface,
        SvgSurface, Viewport,
    },
    services::VcfDataService,
    transport::HttpTransport,
    types::{TrackQuery, VariantRegistration, VariationQuery},
};

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing; stdout is reserved for JSON and SVG output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| config.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let service = || -> anyhow::Result<VcfDataService> {
        let transport = Arc::new(HttpTransport::new(config.effective_server_url())?);
        tracing::info!("Using server {}", transport.base_url());
        Ok(VcfDataService::new(transport))
    };

    match config.command.clone() {
        Command::FieldInfo { id } => print_json(&service()?.fetch_field_info(id).await?)?,
        Command::Register {
            reference_id,
            path,
            index_path,
            name,
        } => {
            let registration = VariantRegistration {
                reference_id,
                path,
                index_path,
                name,
            };
            print_json(&service()?.register_track(&registration).await?)?
        }
        Command::Variation {
            id,
            chromosome_id,
            position,
            project_id,
        } => {
            let query = VariationQuery {
                id,
                chromosome_id,
                position,
                project_id,
            };
            print_json(&service()?.fetch_variant_info(&query).await)?
        }
        Command::Track {
            id,
            chromosome_id,
            start,
            end,
            scale_factor,
        } => {
            let query = TrackQuery {
                id,
                chromosome_id,
                start_index: start,
                end_index: end,
                scale_factor,
            };
            print_json(&service()?.load_track_blocks(&query).await?)?
        }
        Command::Files { reference_id } => {
            print_json(&service()?.list_all_files(reference_id).await?)?
        }
        Command::Render {
            input,
            start,
            end,
            factor,
            width,
            config: render_config,
            output,
        } => {
            let reference_config = match render_config {
                Some(path) => ReferenceConfig::from_path(&path)?,
                None => ReferenceConfig::default(),
            };
            let block: ReferenceBlock = serde_json::from_str(&std::fs::read_to_string(&input)?)?;
            let viewport = match factor {
                Some(factor) => Viewport::new(start, end, factor)?,
                None => Viewport::fit(start, end, width)?,
            };
            tracing::info!(
                "Rendering {} reference items at {} px/bp",
                block.items.len(),
                viewport.factor()
            );

            let mut renderer = ReferenceRenderer::new(reference_config)?;
            renderer.render(&viewport, Some(&block));

            let mut surface = SvgSurface::new(viewport.measure(end - start), renderer.height());
            surface.draw(renderer.container())?;
            let svg = surface.finish();

            match output {
                Some(path) => {
                    std::fs::write(&path, svg)?;
                    tracing::info!("Wrote {:?}", path);
                }
                None => print!("{}", svg),
            }
        }
    }

    Ok(())
}
