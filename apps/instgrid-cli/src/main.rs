use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use instgrid_layout::{DEFAULT_SPACING, GridLayout};
use instgrid_render::{CpuRenderer, DebugTextRenderer, DrawCall, DrawConfig, Mesh, Renderer};
use instgrid_shading::{OutputPolicy, shade_fragment};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "instgrid-cli", about = "CLI tool for instanced grid operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// Print the grid shape and every cell for an instance count
    Layout {
        /// Number of instances in the draw
        #[arg(short, long, default_value = "9")]
        instances: u32,
    },
    /// Run the vertex and fragment stages for one instance of the quad
    Shade {
        /// Number of instances in the draw
        #[arg(short, long, default_value = "9")]
        instances: u32,
        /// Instance to evaluate
        #[arg(long, default_value = "0")]
        index: u32,
        /// Output policy: transformed or untransformed
        #[arg(short, long, default_value_t = OutputPolicy::default())]
        policy: OutputPolicy,
    },
    /// Run a full CPU draw of the quad and print a report
    Draw {
        /// JSON draw config; flags below override its values
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of instances in the draw
        #[arg(short, long)]
        instances: Option<u32>,
        /// Output policy: transformed or untransformed
        #[arg(short, long)]
        policy: Option<OutputPolicy>,
        /// Reframe the camera so the whole grid is visible
        #[arg(long)]
        fit: bool,
        /// Instances listed individually in the report
        #[arg(long, default_value = "16")]
        list: u32,
    },
    /// Print the default draw config as JSON
    Config,
    /// Print the WGSL source of the GPU stages
    Shader,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("instgrid-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", instgrid_common::crate_info());
            println!("layout: {}", instgrid_layout::crate_info());
            println!("shading: {}", instgrid_shading::crate_info());
            println!("render: {}", instgrid_render::crate_info());
            println!("gpu max instances: {}", instgrid_render_wgpu::MAX_INSTANCES);
        }
        Commands::Layout { instances } => {
            let layout = GridLayout::new(instances).context("cannot lay out the draw")?;
            println!(
                "Layout: instances={}, columns={}, rows={}",
                layout.num_instances(),
                layout.columns(),
                layout.rows()
            );
            for (i, cell) in layout.cells().enumerate() {
                let offset = layout.offset(i as u32, DEFAULT_SPACING);
                println!(
                    "  [{i}] row={} column={} offset=({:.1}, {:.1}, {:.1})",
                    cell.row, cell.column, offset.x, offset.y, offset.z
                );
            }
        }
        Commands::Shade {
            instances,
            index,
            policy,
        } => {
            let layout = GridLayout::new(instances).context("cannot lay out the draw")?;
            let cell = layout
                .try_cell(index)
                .context("instance index must be below the instance count")?;

            let config = DrawConfig {
                instances,
                policy,
                ..DrawConfig::default()
            };
            let stage = config.stage()?;

            let offset = stage.offset(index);
            println!(
                "Instance {index} of {instances}: columns={}, row={}, column={}",
                layout.columns(),
                cell.row,
                cell.column
            );
            println!("  offset=({:.2}, {:.2}, {:.2})", offset.x, offset.y, offset.z);
            for (v, vertex) in Mesh::quad().vertices.iter().enumerate() {
                let out = stage.run(vertex, index);
                let rgba = shade_fragment(&out.interpolants);
                let c = out.clip_position;
                println!(
                    "  v{v}: clip=({:.3}, {:.3}, {:.3}, {:.3}) rgba=({:.3}, {:.3}, {:.3}, {:.1})",
                    c.x, c.y, c.z, c.w, rgba.x, rgba.y, rgba.z, rgba.w
                );
            }
        }
        Commands::Draw {
            config,
            instances,
            policy,
            fit,
            list,
        } => {
            let mut draw_config = match config {
                Some(path) => DrawConfig::load(&path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
                None => DrawConfig::default(),
            };
            if let Some(instances) = instances {
                draw_config.instances = instances;
            }
            if let Some(policy) = policy {
                draw_config.policy = policy;
            }
            draw_config.fit_view |= fit;

            let stage = draw_config.stage().context("invalid draw config")?;
            let draw = DrawCall::new(Mesh::quad(), stage)?;

            let report = DebugTextRenderer { max_listed: list }.render(&draw);
            print!("{report}");

            let frame = CpuRenderer::new().render(&draw)?;
            println!(
                "CPU draw: {} vertex invocations, {} fragments, {} of {} vertices in view",
                frame.vertices.len(),
                frame.fragments.len(),
                frame.visible_vertices(),
                frame.vertices.len()
            );
            tracing::info!(instances = frame.instance_count, "draw finished");
        }
        Commands::Config => {
            println!("{}", DrawConfig::default().to_json()?);
        }
        Commands::Shader => {
            print!("{}", instgrid_render_wgpu::GRID_SHADER);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shade_uses_library_default_policy() {
        let cli = Cli::try_parse_from(["instgrid-cli", "shade", "--instances", "4"]).unwrap();
        match cli.command {
            Commands::Shade { policy, .. } => assert_eq!(policy, OutputPolicy::default()),
            _ => panic!("expected shade"),
        }
    }

    #[test]
    fn shade_accepts_explicit_policy() {
        let cli =
            Cli::try_parse_from(["instgrid-cli", "shade", "--policy", "untransformed"]).unwrap();
        match cli.command {
            Commands::Shade { policy, .. } => assert_eq!(policy, OutputPolicy::Untransformed),
            _ => panic!("expected shade"),
        }
    }

    #[test]
    fn draw_leaves_policy_to_config() {
        let cli = Cli::try_parse_from(["instgrid-cli", "draw"]).unwrap();
        match cli.command {
            Commands::Draw { policy, .. } => assert_eq!(policy, None),
            _ => panic!("expected draw"),
        }
    }
}
