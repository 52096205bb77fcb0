use crate::network::deadline::Deadline;
use crate::network::endpoint::Endpoint;

pub const DEFAULT_PROBE_TIMEOUT: Deadline = Deadline::from_millis(200);
pub const DEFAULT_IO_DEADLINE: Deadline = Deadline::from_millis(1_000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Profile server used when a command names no endpoint of its own.
    pub server: Option<Endpoint>,
    /// Identifier reported to the profile server, unset when the operator gave none.
    pub machine_id: Option<u64>,
    /// How long a reachability probe waits for the handshake.
    pub probe_timeout: Deadline,
    /// Budget for each individual send or receive.
    pub io_deadline: Deadline,
    /// Logs every transfer, payload included, at trace level.
    ///
    /// Meant for debugging the exchange with the server; it is noisy.
    pub verbose_log_output: bool,
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: None,
            machine_id: None,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            io_deadline: DEFAULT_IO_DEADLINE,
            verbose_log_output: false,
            quiet: 0,
        }
    }
}

impl Config {
    /// Picks the endpoint a command should talk to: the explicit one if given,
    /// otherwise the configured server.
    pub fn target(&self, explicit: Option<Endpoint>) -> Option<Endpoint> {
        explicit.or(self.server)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
