//! conch CLI — seashell surface generation over OBJ meshes.
//!
//! Loads a profile mesh, lofts its polygons into a spiral tapering tube,
//! and writes the edited mesh back out.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use conch::{build_shell, Axis, FaceId, Parameters};

mod obj;

#[derive(Parser)]
#[command(name = "conch")]
#[command(about = "Generate seashell surfaces from profile polygons", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Loft the polygons of an OBJ mesh into a seashell surface
    Generate {
        /// Input OBJ file holding the profile polygon(s)
        input: PathBuf,
        /// Output OBJ file
        output: PathBuf,
        /// TOML preset with a full or partial parameter set
        #[arg(long)]
        params: Option<PathBuf>,
        /// Axis of revolution and taper (x, y or z)
        #[arg(long)]
        axis: Option<Axis>,
        /// Number of full revolutions
        #[arg(long)]
        loops: Option<u32>,
        /// Angular subdivisions per revolution
        #[arg(long)]
        sides: Option<u32>,
        /// Distance of the apex along the axis
        #[arg(long)]
        offset: Option<f64>,
        /// Per-revolution shrink factor toward the apex
        #[arg(long)]
        scale: Option<f64>,
        /// Emit texture coordinates
        #[arg(long)]
        uvs: Option<bool>,
        /// Total U-axis texture repeat count scaling factor
        #[arg(long)]
        u_wrap: Option<f64>,
        /// V-axis texture coordinate scaling factor
        #[arg(long)]
        v_wrap: Option<f64>,
        /// Destination UV map name
        #[arg(long)]
        uv_map: Option<String>,
        /// Operate only on these zero-based face indices
        #[arg(long, value_delimiter = ',')]
        faces: Option<Vec<usize>>,
    },
    /// Display information about an OBJ mesh
    Info {
        /// Path to the OBJ file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            params,
            axis,
            loops,
            sides,
            offset,
            scale,
            uvs,
            u_wrap,
            v_wrap,
            uv_map,
            faces,
        } => {
            let mut p = load_preset(params.as_deref())?;
            if let Some(axis) = axis {
                p.axis = axis;
            }
            if let Some(loops) = loops {
                p.loops = loops;
            }
            if let Some(sides) = sides {
                p.sides = sides;
            }
            if let Some(offset) = offset {
                p.offset = offset;
            }
            if let Some(scale) = scale {
                p.scale = scale;
            }
            if let Some(uvs) = uvs {
                p.make_uvs = uvs;
            }
            if let Some(u_wrap) = u_wrap {
                p.u_wrap = u_wrap;
            }
            if let Some(v_wrap) = v_wrap {
                p.v_wrap = v_wrap;
            }
            if let Some(uv_map) = uv_map {
                p.uv_map_name = uv_map;
            }
            validate(&p)?;

            let mut mesh = obj::read(&input)?;
            if let Some(indices) = faces {
                select_faces(&mut mesh, &indices)?;
            }

            let report = build_shell(&mut mesh, &p)?;
            let uv_map = p.make_uvs.then_some(p.uv_map_name.as_str());
            obj::write(&output, &mesh, uv_map)?;

            println!(
                "Generated {} rings: {} vertices, {} faces ({} skipped) -> {}",
                report.rings,
                report.vertices_added,
                report.faces_added,
                report.faces_skipped,
                output.display()
            );
        }
        Commands::Info { file } => {
            let mesh = obj::read(&file)?;
            println!("{}", file.display());
            println!("  vertices: {}", mesh.vertex_count());
            println!("  faces:    {}", mesh.face_count());
            for name in mesh.uv_map_names() {
                println!("  uv map:   {name}");
            }
        }
    }

    Ok(())
}

fn load_preset(path: Option<&std::path::Path>) -> Result<Parameters> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading preset {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parsing preset {}", path.display()))
        }
        None => Ok(Parameters::default()),
    }
}

fn validate(params: &Parameters) -> Result<()> {
    if params.loops < 1 {
        bail!("--loops must be at least 1");
    }
    if params.sides < 1 {
        bail!("--sides must be at least 1");
    }
    if params.offset < 1.0 {
        bail!("--offset must be at least 1.0");
    }
    Ok(())
}

fn select_faces(mesh: &mut conch::Mesh, indices: &[usize]) -> Result<()> {
    let ids: Vec<FaceId> = mesh.faces().map(|(id, _)| id).collect();
    for &idx in indices {
        match ids.get(idx) {
            Some(&id) => {
                mesh.select_face(id, true);
            }
            None => bail!("--faces index {idx} out of range (mesh has {} faces)", ids.len()),
        }
    }
    Ok(())
}
