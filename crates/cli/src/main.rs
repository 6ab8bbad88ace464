mod io;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use diskgraph::prelude::*;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "diskgraph")]
#[command(about = "Inspect and edit point-group snapshots")]
struct Cmd {
    /// Distance to the synthetic endpoint of infinite FPVD edges
    #[arg(long, global = true, default_value_t = GeomCfg::default().ray_length)]
    ray_length: f64,

    /// Gap left between two disks after collision resolution
    #[arg(long, global = true, default_value_t = GeomCfg::default().separation)]
    separation: f64,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Summarize every group of a snapshot
    Inspect { input: PathBuf },
    /// Recompute hulls and FPVDs from the stored points (disks are kept)
    Rebuild {
        input: PathBuf,
        /// Output path; defaults to rewriting the input
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the spanning forest over group disks
    Forest {
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = Mode::Collisions)]
        mode: Mode,
    },
    /// Fit a group's disk to two or three of its points
    Fit {
        input: PathBuf,
        #[arg(long)]
        group: String,
        /// Point indices, comma separated (two or three)
        #[arg(long, value_delimiter = ',', required = true)]
        points: Vec<usize>,
        /// Disk center `x,y` for the two-point fit
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        center: Option<Vec<f64>>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Move one group's disk off another's
    Resolve {
        input: PathBuf,
        #[arg(long)]
        moving: String,
        #[arg(long)]
        fixed: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Contact point of two nearly tangent disks
    Tangent {
        input: PathBuf,
        #[arg(long)]
        a: String,
        #[arg(long)]
        b: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Collisions,
    Proximity,
}

impl From<Mode> for TreeMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Collisions => TreeMode::Collisions,
            Mode::Proximity => TreeMode::Proximity,
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let report = execute(cmd)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn execute(cmd: Cmd) -> Result<Value> {
    let cfg = GeomCfg {
        ray_length: cmd.ray_length,
        separation: cmd.separation,
        ..GeomCfg::default()
    };
    match cmd.action {
        Action::Inspect { input } => {
            let scene = io::read_scene(&input, cfg)?;
            Ok(inspect(&scene))
        }
        Action::Rebuild { input, out } => {
            let mut scene = io::read_scene(&input, cfg)?;
            rebuild(&mut scene);
            let out = out.unwrap_or(input);
            io::write_scene(&out, &scene)?;
            Ok(json!({ "rebuilt": scene.groups().len(), "out": out.to_string_lossy() }))
        }
        Action::Forest { input, mode } => {
            let scene = io::read_scene(&input, cfg)?;
            Ok(forest(&scene, mode.into()))
        }
        Action::Fit {
            input,
            group,
            points,
            center,
            out,
        } => {
            let mut scene = io::read_scene(&input, cfg)?;
            let disk = fit(&mut scene, &group, &points, center.as_deref())?;
            io::write_scene(out.unwrap_or(input), &scene)?;
            Ok(json!({ "group": group, "disk": DiskReport::from(&disk) }))
        }
        Action::Resolve {
            input,
            moving,
            fixed,
            out,
        } => {
            let mut scene = io::read_scene(&input, cfg)?;
            let (m, f) = (group_index(&scene, &moving)?, group_index(&scene, &fixed)?);
            let disk = scene
                .resolve_collision(m, f)
                .with_context(|| format!("moving '{moving}' off '{fixed}'"))?;
            io::write_scene(out.unwrap_or(input), &scene)?;
            Ok(json!({ "group": moving, "disk": DiskReport::from(&disk) }))
        }
        Action::Tangent { input, a, b } => {
            let mut scene = io::read_scene(&input, cfg)?;
            let (i, j) = (group_index(&scene, &a)?, group_index(&scene, &b)?);
            let p = scene.tangential_point(i, j)?;
            Ok(serde_json::to_value(PointReport::from(p))?)
        }
    }
}

fn group_index(scene: &Scene, name: &str) -> Result<usize> {
    match scene.find(name) {
        Some(i) => Ok(i),
        None => bail!("no group named '{name}'"),
    }
}

#[derive(Serialize)]
struct PointReport {
    x: f64,
    y: f64,
}

impl From<Vec2<f64>> for PointReport {
    fn from(p: Vec2<f64>) -> Self {
        Self { x: p.x, y: p.y }
    }
}

#[derive(Serialize)]
struct DiskReport {
    center: PointReport,
    radius: f64,
}

impl From<&Disk> for DiskReport {
    fn from(disk: &Disk) -> Self {
        Self {
            center: disk.center.into(),
            radius: disk.radius,
        }
    }
}

#[derive(Serialize)]
struct EdgeReport<'a> {
    parent: &'a str,
    child: &'a str,
    colliding: bool,
}

fn inspect(scene: &Scene) -> Value {
    let groups: Vec<Value> = scene
        .groups()
        .iter()
        .enumerate()
        .map(|(i, g)| {
            let fpvd = g.fpvd();
            json!({
                "name": g.name,
                "points": g.points().len(),
                "hull": g.hull().ids,
                "fpvd": {
                    "finiteVertices": fpvd.finite_vertices().count(),
                    "finiteEdges": fpvd.finite_edges().count(),
                    "rays": fpvd.infinite_edges().count()
                },
                "disk": g.disk().map(DiskReport::from),
                "coversPoints": g.covers_points().ok(),
                "collides": scene.collides(i).ok()
            })
        })
        .collect();
    json!({ "groups": groups, "maxDistance": scene.max_distance() })
}

fn rebuild(scene: &mut Scene) {
    for i in 0..scene.groups().len() {
        if let Ok(group) = scene.group_mut(i) {
            group.recompute();
        }
    }
}

fn forest(scene: &Scene, mode: TreeMode) -> Value {
    let name = |i: usize| scene.groups()[i].name.as_str();
    let edges: Vec<EdgeReport> = scene
        .forest_edges(mode)
        .iter()
        .map(|e| EdgeReport {
            parent: name(e.parent),
            child: name(e.child),
            colliding: e.colliding,
        })
        .collect();
    let roots: Vec<&str> = scene
        .forest(mode)
        .roots
        .iter()
        .map(|r| name(r.group))
        .collect();
    json!({ "roots": roots, "edges": edges })
}

fn fit(scene: &mut Scene, group: &str, points: &[usize], center: Option<&[f64]>) -> Result<Disk> {
    let i = group_index(scene, group)?;
    let g = scene.group_mut(i)?;
    let disk = match (points.len(), center) {
        (3, None) => g.set_disk_from_three_points(points)?,
        (2, None) => g.set_disk_from_two_points(points)?,
        (2, Some(&[x, y])) => g.set_disk_from_two_points_and_center(points, Vec2::new(x, y))?,
        (2, Some(c)) => bail!("--center takes two coordinates, got {}", c.len()),
        (3, Some(_)) => bail!("--center only applies to a two-point fit"),
        (n, _) => bail!("a disk is fitted to two or three points, got {n}"),
    };
    Ok(disk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_sample(path: &Path) {
        let mut scene = Scene::default();
        scene.add_group("a", vec![Vec2::new(-4.0, 3.0), Vec2::new(-4.0, -3.0)]);
        let b = scene.add_group(
            "b",
            vec![Vec2::new(3.0, 5.0), Vec2::new(3.0, -5.0), Vec2::new(8.0, 0.0)],
        );
        scene
            .group_mut(b)
            .unwrap()
            .set_disk(Some(Disk::new(Vec2::new(3.0, 0.0), 5.0)));
        io::write_scene(path, &scene).unwrap();
    }

    fn run(args: &[&str]) -> Result<Value> {
        let cmd = Cmd::try_parse_from(std::iter::once("diskgraph").chain(args.iter().copied()))?;
        execute(cmd)
    }

    #[test]
    fn reports_serialize_with_stable_field_names() {
        let disk = Disk::new(Vec2::new(1.5, -2.0), 4.0);
        assert_eq!(
            serde_json::to_value(DiskReport::from(&disk)).unwrap(),
            json!({ "center": { "x": 1.5, "y": -2.0 }, "radius": 4.0 })
        );
        let edge = EdgeReport {
            parent: "a",
            child: "b",
            colliding: true,
        };
        assert_eq!(
            serde_json::to_value(edge).unwrap(),
            json!({ "parent": "a", "child": "b", "colliding": true })
        );
    }

    #[test]
    fn fit_then_resolve_updates_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scene.json");
        write_sample(&path);
        let file = path.to_str().unwrap();

        let fitted = run(&["fit", file, "--group", "a", "--points", "0,1"]).unwrap();
        assert_eq!(fitted["disk"]["radius"], json!(3.0));

        let report = run(&["inspect", file]).unwrap();
        assert_eq!(report["groups"][0]["collides"], json!(true));
        assert_eq!(report["groups"][1]["fpvd"]["finiteVertices"], json!(1));

        let moved = run(&["resolve", file, "--moving", "a", "--fixed", "b"]).unwrap();
        let x = moved["disk"]["center"]["x"].as_f64().unwrap();
        assert!((x + 8.0).abs() < 1e-9);

        let report = run(&["inspect", file]).unwrap();
        assert_eq!(report["groups"][0]["collides"], json!(false));
    }

    #[test]
    fn forest_modes_and_tangent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scene.json");
        write_sample(&path);
        let file = path.to_str().unwrap();
        run(&["fit", file, "--group", "a", "--points", "0,1", "--center=-6,0"]).unwrap();

        let f = run(&["forest", file]).unwrap();
        assert_eq!(f["roots"], json!(["a"]));
        assert_eq!(f["edges"][0]["child"], json!("b"));
        let f = run(&["forest", file, "--mode", "proximity"]).unwrap();
        assert_eq!(f["edges"].as_array().map(Vec::len), Some(1));

        // a: center (-6, 0), radius sqrt(13) ≈ 3.61; b: radius 5, centers 9 apart.
        let p = run(&["tangent", file, "--a", "a", "--b", "b"]).unwrap();
        assert!(p["x"].as_f64().unwrap() < 0.0);
        assert!(run(&["tangent", file, "--a", "a", "--b", "nope"]).is_err());
    }

    #[test]
    fn rebuild_writes_to_a_new_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scene.json");
        let out = dir.path().join("out/rebuilt.json");
        write_sample(&path);
        let report = run(&[
            "--ray-length",
            "10",
            "rebuild",
            path.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(report["rebuilt"], json!(2));

        let scene = io::read_scene(&out, GeomCfg::default()).unwrap();
        let ray = scene.groups()[0].fpvd().vertices[0].position;
        assert!(((ray - Vec2::new(-4.0, 0.0)).norm() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn fit_rejects_bad_arity() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scene.json");
        write_sample(&path);
        let file = path.to_str().unwrap();
        assert!(run(&["fit", file, "--group", "b", "--points", "0"]).is_err());
        let three_with_center = [
            "fit", file, "--group", "b", "--points", "0,1,2", "--center", "1,1",
        ];
        assert!(run(&three_with_center).is_err());
        assert!(run(&["fit", file, "--group", "b", "--points", "0,1", "--center", "1"]).is_err());
    }
}
