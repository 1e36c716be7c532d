use anyhow::bail;
use clap::{Parser, Subcommand};
use pkg_capacity::CapacityCalculator;
use pkg_scaling::ScalingImpactAnalyzer;
use pkg_scaling::snapshots::{ClusterSnapshots, StaticSnapshots};
use pkg_types::config::{EngineConfigFile, load_config_file};
use pkg_types::pod::{PodProfile, PodResources};
use pkg_types::quota::ResolvedQuota;
use pkg_types::scaling::ScalingImpactInput;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "capctl", about = "Namespace capacity planning and scaling impact analysis")]
struct Cli {
    /// Path to YAML engine config file
    #[arg(long, short, default_value = "capctl.yaml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Estimate how many pods of each profile still fit in a namespace
    Capacity {
        /// Cluster snapshot file (YAML)
        #[arg(long)]
        snapshot: String,
        #[arg(long)]
        namespace: String,
        /// small, medium, large or custom
        #[arg(long, default_value = "medium")]
        profile: PodProfile,
        /// Custom pod CPU request in millicores
        #[arg(long)]
        cpu_millicores: Option<u64>,
        /// Custom pod memory request in MiB
        #[arg(long)]
        memory_mb: Option<u64>,
        #[arg(long)]
        safety_margin: Option<f64>,
    },
    /// Forecast days until utilization reaches 85%
    Trend {
        /// Historical CPU utilization percentages, oldest first
        #[arg(long, value_delimiter = ',')]
        cpu: Vec<f64>,
        /// Historical memory utilization percentages, oldest first
        #[arg(long, value_delimiter = ',')]
        memory: Vec<f64>,
        #[arg(long)]
        current_cpu: f64,
        #[arg(long)]
        current_memory: f64,
    },
    /// Project the effect of changing a deployment's replica count
    ScalingImpact {
        /// Cluster snapshot file (YAML)
        #[arg(long)]
        snapshot: String,
        #[arg(long)]
        namespace: String,
        #[arg(long)]
        deployment: String,
        /// Target replica count
        #[arg(long)]
        target: u32,
        /// Override the replica count recorded in the snapshot
        #[arg(long)]
        current: Option<u32>,
        /// Skip the control-plane impact assessment
        #[arg(long)]
        no_infrastructure: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    // Missing config file means defaults
    let file_cfg: EngineConfigFile = load_config_file(&cli.config)?;
    info!("Config file: {}", cli.config);

    match cli.command {
        Commands::Capacity {
            snapshot,
            namespace,
            profile,
            cpu_millicores,
            memory_mb,
            safety_margin,
        } => {
            let custom = match (cpu_millicores, memory_mb) {
                (Some(cpu_millicores), Some(memory_mb)) => Some(PodResources {
                    cpu_millicores,
                    memory_mb,
                }),
                (None, None) => None,
                _ => bail!("--cpu-millicores and --memory-mb must be given together"),
            };

            let snapshots = StaticSnapshots::from_file(&snapshot)?;
            let quota = match snapshots.namespace_quota(&namespace) {
                Ok(q) => ResolvedQuota::from(q),
                Err(e) => {
                    warn!("Quota lookup failed for {}: {:#}; assuming defaults", namespace, e);
                    ResolvedQuota::unavailable(&namespace)
                }
            };

            // Merge: CLI args > config file > defaults
            let calculator = CapacityCalculator::new(file_cfg.safety_margin_or_default());
            let result = calculator.calculate_resolved(&quota, profile, custom, safety_margin)?;
            print_json(&result)?;
        }
        Commands::Trend {
            cpu,
            memory,
            current_cpu,
            current_memory,
        } => {
            let calculator = CapacityCalculator::new(file_cfg.safety_margin_or_default());
            let trend = calculator.calculate_trending(&cpu, &memory, current_cpu, current_memory);
            print_json(&trend)?;
        }
        Commands::ScalingImpact {
            snapshot,
            namespace,
            deployment,
            target,
            current,
            no_infrastructure,
        } => {
            let snapshots = StaticSnapshots::from_file(&snapshot)?;
            let include_infrastructure =
                !no_infrastructure && file_cfg.include_infrastructure.unwrap_or(true);

            let input = ScalingImpactInput {
                current_replicas: current,
                include_infrastructure,
                ..ScalingImpactInput::new(&deployment, &namespace, target)
            };
            let analyzer = ScalingImpactAnalyzer::new(&snapshots, file_cfg.scaling);
            let output = analyzer.execute(&input)?;
            print_json(&output)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
