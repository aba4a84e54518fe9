use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "ngb-vcf")]
#[command(about = "VCF data service client and reference track renderer")]
pub struct Config {
    /// Base URL of the genomics server REST API
    #[arg(
        long,
        global = true,
        env = "NGB_SERVER_URL",
        default_value = "http://localhost:8080/catgenome/restapi"
    )]
    pub server_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print INFO/FORMAT field metadata of a VCF file
    FieldInfo {
        /// VCF file id
        id: u64,
    },

    /// Register a VCF file against a reference
    Register {
        #[arg(long)]
        reference_id: u64,
        /// Path of the VCF file on the server
        #[arg(long)]
        path: String,
        #[arg(long)]
        index_path: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },

    /// Print details of the variant at a position (null when unavailable)
    Variation {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        chromosome_id: u64,
        #[arg(long)]
        position: u64,
        #[arg(long)]
        project_id: Option<u64>,
    },

    /// Print the blocks of a VCF track
    Track {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        chromosome_id: u64,
        #[arg(long)]
        start: u64,
        #[arg(long)]
        end: u64,
        #[arg(long)]
        scale_factor: Option<f64>,
    },

    /// List all VCF files registered for a reference
    Files {
        reference_id: u64,
    },

    /// Render a reference block (JSON) to SVG
    Render {
        /// Reference block JSON file
        #[arg(long)]
        input: PathBuf,
        /// First visible base pair
        #[arg(long)]
        start: f64,
        /// Last visible base pair
        #[arg(long)]
        end: f64,
        /// Pixels per base pair; derived from --width when omitted
        #[arg(long)]
        factor: Option<f64>,
        /// Canvas width in pixels
        #[arg(long, default_value = "1000")]
        width: f64,
        /// Renderer configuration JSON file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Config {
    pub fn effective_server_url(&self) -> &str {
        self.server_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_server_url_trims_slash() {
        let config = Config::try_parse_from([
            "ngb-vcf",
            "--server-url",
            "https://example.com/restapi/",
            "files",
            "1",
        ])
        .unwrap();
        assert_eq!(config.effective_server_url(), "https://example.com/restapi");
    }

    #[test]
    fn test_register_args() {
        let config = Config::try_parse_from([
            "ngb-vcf",
            "register",
            "--reference-id",
            "3",
            "--path",
            "/data/a.vcf.gz",
        ])
        .unwrap();
        match config.command {
            Command::Register {
                reference_id,
                path,
                index_path,
                name,
            } => {
                assert_eq!(reference_id, 3);
                assert_eq!(path, "/data/a.vcf.gz");
                assert!(index_path.is_none());
                assert!(name.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_render_defaults() {
        let config = Config::try_parse_from([
            "ngb-vcf", "render", "--input", "block.json", "--start", "0", "--end", "100",
        ])
        .unwrap();
        match config.command {
            Command::Render {
                factor,
                width,
                output,
                ..
            } => {
                assert!(factor.is_none());
                assert_eq!(width, 1000.0);
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_missing_subcommand() {
        assert!(Config::try_parse_from(["ngb-vcf"]).is_err());
    }
}
