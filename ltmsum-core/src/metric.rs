//! Metric Definitions
//!
//! Raw capture columns ([`RawSeries`]) and the eleven summarized metrics
//! ([`MetricKind`]) derived from them. Each metric names its source column
//! and the [`Reduction`] applied to it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw per-tick sample column supplied by a capture (besides `run_time`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawSeries {
    /// System CPU load, percent
    SysCpu,
    /// TMM CPU load, percent
    TmmCpu,
    /// Memory in use, bytes
    Memory,
    /// Client-side bytes received (accumulator)
    ClientBytesIn,
    /// Client-side bytes sent (accumulator)
    ClientBytesOut,
    /// Server-side bytes received (accumulator)
    ServerBytesIn,
    /// Server-side bytes sent (accumulator)
    ServerBytesOut,
    /// Client-side active connections (gauge)
    ClientConnActive,
    /// Client-side connections established (accumulator)
    ClientConnCount,
    /// Server-side active connections (gauge)
    ServerConnActive,
    /// Server-side connections established (accumulator)
    ServerConnCount,
}

impl RawSeries {
    /// All raw series in capture order
    pub const ALL: [RawSeries; 11] = [
        RawSeries::SysCpu,
        RawSeries::TmmCpu,
        RawSeries::Memory,
        RawSeries::ClientBytesIn,
        RawSeries::ClientBytesOut,
        RawSeries::ServerBytesIn,
        RawSeries::ServerBytesOut,
        RawSeries::ClientConnActive,
        RawSeries::ClientConnCount,
        RawSeries::ServerConnActive,
        RawSeries::ServerConnCount,
    ];

    /// Stable snake_case name
    pub fn key(self) -> &'static str {
        match self {
            RawSeries::SysCpu => "sys_cpu",
            RawSeries::TmmCpu => "tmm_cpu",
            RawSeries::Memory => "memory",
            RawSeries::ClientBytesIn => "client_bytes_in",
            RawSeries::ClientBytesOut => "client_bytes_out",
            RawSeries::ServerBytesIn => "server_bytes_in",
            RawSeries::ServerBytesOut => "server_bytes_out",
            RawSeries::ClientConnActive => "client_conn_active",
            RawSeries::ClientConnCount => "client_conn_count",
            RawSeries::ServerConnActive => "server_conn_active",
            RawSeries::ServerConnCount => "server_conn_count",
        }
    }
}

impl fmt::Display for RawSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How a raw column is turned into a derived sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// Gauge: drop pre-roll, reduce as-is
    Raw,
    /// Gauge in bytes: drop pre-roll, convert to MiB
    Memory,
    /// Byte accumulator: per-interval Mb/s
    Throughput,
    /// Count accumulator: per-interval counts/s
    Counts,
}

/// Summarized metric, in report column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// System CPU percent
    SysCpu,
    /// TMM CPU percent
    TmmCpu,
    /// Memory, MiB
    Memory,
    /// Client ingress, Mb/s
    ClientMbIn,
    /// Client egress, Mb/s
    ClientMbOut,
    /// Server ingress, Mb/s
    ServerMbIn,
    /// Server egress, Mb/s
    ServerMbOut,
    /// Client concurrent connections
    ClientCc,
    /// Client connections per second
    ClientCps,
    /// Server concurrent connections
    ServerCc,
    /// Server connections per second
    ServerCps,
}

impl MetricKind {
    /// Number of summarized metrics
    pub const COUNT: usize = 11;

    /// All metrics in report column order
    pub const ALL: [MetricKind; MetricKind::COUNT] = [
        MetricKind::SysCpu,
        MetricKind::TmmCpu,
        MetricKind::Memory,
        MetricKind::ClientMbIn,
        MetricKind::ClientMbOut,
        MetricKind::ServerMbIn,
        MetricKind::ServerMbOut,
        MetricKind::ClientCc,
        MetricKind::ClientCps,
        MetricKind::ServerCc,
        MetricKind::ServerCps,
    ];

    /// Position in [`MetricKind::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Raw column this metric is derived from
    pub fn source(self) -> RawSeries {
        match self {
            MetricKind::SysCpu => RawSeries::SysCpu,
            MetricKind::TmmCpu => RawSeries::TmmCpu,
            MetricKind::Memory => RawSeries::Memory,
            MetricKind::ClientMbIn => RawSeries::ClientBytesIn,
            MetricKind::ClientMbOut => RawSeries::ClientBytesOut,
            MetricKind::ServerMbIn => RawSeries::ServerBytesIn,
            MetricKind::ServerMbOut => RawSeries::ServerBytesOut,
            MetricKind::ClientCc => RawSeries::ClientConnActive,
            MetricKind::ClientCps => RawSeries::ClientConnCount,
            MetricKind::ServerCc => RawSeries::ServerConnActive,
            MetricKind::ServerCps => RawSeries::ServerConnCount,
        }
    }

    /// Reduction applied to the source column
    pub fn reduction(self) -> Reduction {
        match self {
            MetricKind::SysCpu | MetricKind::TmmCpu | MetricKind::ClientCc | MetricKind::ServerCc => {
                Reduction::Raw
            }
            MetricKind::Memory => Reduction::Memory,
            MetricKind::ClientMbIn
            | MetricKind::ClientMbOut
            | MetricKind::ServerMbIn
            | MetricKind::ServerMbOut => Reduction::Throughput,
            MetricKind::ClientCps | MetricKind::ServerCps => Reduction::Counts,
        }
    }

    /// Column label prefix, e.g. `"Sys CPU"`
    pub fn label(self) -> &'static str {
        match self {
            MetricKind::SysCpu => "Sys CPU",
            MetricKind::TmmCpu => "TMM CPU",
            MetricKind::Memory => "Memory",
            MetricKind::ClientMbIn => "Client Mb In",
            MetricKind::ClientMbOut => "Client Mb Out",
            MetricKind::ServerMbIn => "Server Mb In",
            MetricKind::ServerMbOut => "Server Mb Out",
            MetricKind::ClientCc => "Client CC",
            MetricKind::ClientCps => "Client CPS",
            MetricKind::ServerCc => "Server CC",
            MetricKind::ServerCps => "Server CPS",
        }
    }

    /// Stable snake_case key, matching the serde representation
    pub fn key(self) -> &'static str {
        match self {
            MetricKind::SysCpu => "sys_cpu",
            MetricKind::TmmCpu => "tmm_cpu",
            MetricKind::Memory => "memory",
            MetricKind::ClientMbIn => "client_mb_in",
            MetricKind::ClientMbOut => "client_mb_out",
            MetricKind::ServerMbIn => "server_mb_in",
            MetricKind::ServerMbOut => "server_mb_out",
            MetricKind::ClientCc => "client_cc",
            MetricKind::ClientCps => "client_cps",
            MetricKind::ServerCc => "server_cc",
            MetricKind::ServerCps => "server_cps",
        }
    }

    /// Display unit of the summarized values
    pub fn unit(self) -> &'static str {
        match self.reduction() {
            Reduction::Raw => match self {
                MetricKind::SysCpu | MetricKind::TmmCpu => "%",
                _ => "conns",
            },
            Reduction::Memory => "MiB",
            Reduction::Throughput => "Mb/s",
            Reduction::Counts => "conns/s",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
