//! Data services built on an injected [`Transport`](crate::transport::Transport).

mod vcf;

pub use vcf::VcfDataService;
