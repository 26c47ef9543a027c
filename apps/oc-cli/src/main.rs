use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use oc_core::{BuildType, Feature, OsFamily};
use oc_graph::BuildOrder;
use oc_recipe::{BuildProfile, Recipe, RecipeResult, apply_patches, cmake, deps, profile};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oc-cli")]
#[command(about = "OpenCASCADE package recipe - toolkit graph, link metadata and source patches", long_about = None)]
struct Cli {
    #[command(flatten)]
    profile: ProfileArgs,

    /// Output format for structured results
    #[arg(long, global = true, value_enum, default_value_t = Format::Json)]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ProfileArgs {
    /// Build profile file (YAML, or JSON by extension)
    #[arg(long, global = true)]
    profile: Option<PathBuf>,
    /// Target operating system (overrides the profile)
    #[arg(long, global = true)]
    os: Option<OsFamily>,
    /// Build type (overrides the profile)
    #[arg(long, global = true)]
    build_type: Option<BuildType>,
    /// Build shared libraries
    #[arg(long, global = true)]
    shared: bool,
    /// Enable an optional dependency (tbb, openvr, rapidjson, ...)
    #[arg(long = "with", global = true)]
    with: Vec<Feature>,
}

impl ProfileArgs {
    fn load(&self) -> RecipeResult<BuildProfile> {
        let mut build = match &self.profile {
            Some(path) => profile::load(path)?,
            None => BuildProfile::default(),
        };
        if let Some(os) = self.os {
            build.settings.os = os;
        }
        if let Some(build_type) = self.build_type {
            build.settings.build_type = build_type;
        }
        if self.shared {
            build.options.shared = true;
        }
        for &feature in &self.with {
            build.options.set_feature(feature, true);
        }
        Ok(build)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the toolkit catalog and the build profile
    Validate,
    /// Print the declared component graph
    Graph,
    /// Print targets in build order (requirements first)
    Order {
        /// Group targets into waves that only depend on earlier waves
        #[arg(long)]
        waves: bool,
    },
    /// Show requirements and dependents of one target
    Show {
        /// Target name, e.g. TKernel
        target: String,
    },
    /// List third-party packages required by the profile
    Requirements,
    /// Emit link metadata for one target, or for the whole package
    Metadata {
        /// Target name (omit for package-level metadata)
        target: Option<String>,
    },
    /// Patch upstream build scripts in a source tree
    Patch {
        /// Root of the extracted upstream sources
        source_dir: PathBuf,
        /// Dependency info file (libs, include and lib dirs per package)
        #[arg(long)]
        deps: PathBuf,
        /// Check every patch applies without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Print CMake cache definitions for configuring upstream
    Definitions {
        /// Dependency info file
        #[arg(long)]
        deps: PathBuf,
    },
    /// List install folders to rename after the build (e.g. libd -> lib)
    Renames,
    /// Generate the CMake alias-target module
    CmakeModule {
        /// Output file (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the package id of the profile
    PackageId,
}

fn main() -> RecipeResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let recipe = Recipe::new(cli.profile.load()?)?;
    let format = cli.format;

    match cli.command {
        Commands::Validate => cmd_validate(&recipe),
        Commands::Graph => emit(&recipe.get_graph(), format),
        Commands::Order { waves } => cmd_order(&recipe, waves),
        Commands::Show { target } => cmd_show(&recipe, &target, format),
        Commands::Requirements => cmd_requirements(&recipe),
        Commands::Metadata { target } => match target {
            Some(target) => emit(&recipe.emit_build_metadata(&target)?, format),
            None => emit(&recipe.emit_package_metadata()?, format),
        },
        Commands::Patch {
            source_dir,
            deps,
            dry_run,
        } => cmd_patch(&recipe, &source_dir, &deps, dry_run),
        Commands::Definitions { deps } => cmd_definitions(&recipe, &deps),
        Commands::Renames => cmd_renames(&recipe),
        Commands::CmakeModule { output } => cmd_cmake_module(&recipe, output.as_deref()),
        Commands::PackageId => {
            println!("{}", recipe.package_id());
            Ok(())
        }
    }
}

fn emit<T: Serialize>(value: &T, format: Format) -> RecipeResult<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(value)?),
        Format::Yaml => print!("{}", serde_yaml::to_string(value)?),
    }
    Ok(())
}

fn cmd_validate(recipe: &Recipe) -> RecipeResult<()> {
    let graph = recipe.graph();
    let profile = recipe.profile();
    println!(
        "✓ Catalog is valid ({} components, {} targets)",
        graph.components().len(),
        graph.targets().len()
    );
    println!(
        "✓ Profile is valid ({}, {}, {})",
        profile.os(),
        profile.settings.build_type,
        if profile.options.shared { "shared" } else { "static" }
    );
    Ok(())
}

fn cmd_order(recipe: &Recipe, waves: bool) -> RecipeResult<()> {
    let graph = recipe.graph();
    let order = BuildOrder::from_graph(graph);
    let name = |id| graph.target(id).map(|t| t.name.as_str()).unwrap_or("?");

    if waves {
        for (i, wave) in order.waves(graph).iter().enumerate() {
            let names: Vec<&str> = wave.iter().map(|&id| name(id)).collect();
            println!("{:>3}: {}", i, names.join(" "));
        }
    } else {
        for &id in order.ids() {
            println!("{}", name(id));
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct TargetReport<'a> {
    name: &'a str,
    component: &'a str,
    requires: Vec<&'a str>,
    transitive_requires: Vec<&'a str>,
    dependents: Vec<&'a str>,
    external_requires: Vec<String>,
}

fn cmd_show(recipe: &Recipe, target: &str, format: Format) -> RecipeResult<()> {
    let graph = recipe.graph();
    let found = graph.target_named(target)?;
    let report = TargetReport {
        name: &found.name,
        component: graph.component_of(found),
        requires: graph.declared_requires(target)?,
        transitive_requires: graph.transitive_requires(target)?,
        dependents: graph.dependents(target)?,
        external_requires: recipe
            .resolve_external_requirements(target)?
            .iter()
            .map(ToString::to_string)
            .collect(),
    };
    emit(&report, format)
}

fn cmd_requirements(recipe: &Recipe) -> RecipeResult<()> {
    for package in recipe.requirements()? {
        println!("{}", package);
    }
    Ok(())
}

fn cmd_patch(recipe: &Recipe, source_dir: &Path, deps_path: &Path, dry_run: bool) -> RecipeResult<()> {
    let deps = deps::load(deps_path)?;
    let patches = recipe.patches(&deps)?;
    let report = apply_patches(source_dir, &patches, dry_run)?;

    let verb = if dry_run { "Would patch" } else { "Patched" };
    println!("✓ {} {} files ({} substitutions)", verb, report.files.len(), report.patches);
    for file in &report.files {
        println!("  {}", file.display());
    }
    Ok(())
}

fn cmd_definitions(recipe: &Recipe, deps_path: &Path) -> RecipeResult<()> {
    let deps = deps::load(deps_path)?;
    for (key, value) in recipe.cmake_definitions(&deps)? {
        println!("-D{}={}", key, value);
    }
    Ok(())
}

fn cmd_renames(recipe: &Recipe) -> RecipeResult<()> {
    let renames = recipe.install_dir_renames();
    if renames.is_empty() {
        println!("✓ Nothing to rename for {} builds", recipe.profile().settings.build_type);
    }
    for (from, to) in renames {
        println!("{} -> {}", from, to);
    }
    Ok(())
}

fn cmd_cmake_module(recipe: &Recipe, output: Option<&Path>) -> RecipeResult<()> {
    match output {
        Some(path) => {
            cmake::save_alias_module(path, recipe.graph())?;
            println!("✓ Wrote {}", path.display());
        }
        None => print!("{}", recipe.alias_module()),
    }
    Ok(())
}
