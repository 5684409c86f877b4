//! Environment for launching a peer process.

use fabric_bootstrap_core::env::GODEBUG_NETDNS;
use fabric_bootstrap_core::{EnvironmentList, PeerContainerConfig};
use serde::{Deserialize, Serialize};

/// Per-peer inputs to [`build_peer_environment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerEnvironment {
    /// Docker network chaincode containers join.
    pub network: String,
    pub msp: PeerMsp,
    /// TLS file locations inside the container; `None` disables TLS.
    pub tls: Option<PeerTlsFiles>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerMsp {
    pub config_path: String,
    /// MSP ID of the peer's organization.
    pub id: String,
    /// Fully qualified peer name, see [`crate::format_peer_name`].
    pub peer_host_name_full: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerTlsFiles {
    pub server_key: String,
    pub server_crt: String,
    pub ca_crt: String,
}

/// Environment variables for a peer process.
///
/// Fourteen baseline entries, then the four `CORE_PEER_TLS_*` entries when
/// TLS files are given. Inputs are interpolated without validation.
pub fn build_peer_environment(
    peer: &PeerEnvironment,
    config: &PeerContainerConfig,
) -> EnvironmentList {
    let host_name = &peer.msp.peer_host_name_full;
    let mut env = EnvironmentList::new();

    env.push(
        "CORE_VM_ENDPOINT",
        format_args!("unix://{}", config.docker_sock.display()),
    );
    env.push("CORE_VM_DOCKER_HOSTCONFIG_NETWORKMODE", &peer.network);
    env.push("CORE_LOGGING_LEVEL", &config.logging_level);
    env.push("CORE_LEDGER_HISTORY_ENABLEHISTORYDATABASE", true);
    env.push("CORE_PEER_GOSSIP_USELEADERELECTION", true);
    env.push("CORE_PEER_GOSSIP_ORGLEADER", false);
    env.push(
        "CORE_PEER_GOSSIP_EXTERNALENDPOINT",
        format_args!("{host_name}:{}", config.peer_port),
    );
    env.push("CORE_PEER_LOCALMSPID", &peer.msp.id);
    env.push("CORE_PEER_MSPCONFIGPATH", &peer.msp.config_path);
    env.push("CORE_PEER_ID", host_name);
    env.push(
        "CORE_PEER_ADDRESS",
        format_args!("{host_name}:{}", config.peer_port),
    );
    env.push(
        "CORE_CHAINCODE_EXECUTETIMEOUT",
        &config.chaincode_execute_timeout,
    );
    env.push(
        "CORE_PEER_CHAINCODELISTENADDRESS",
        &config.chaincode_listen_address,
    );
    env.push_raw(GODEBUG_NETDNS);

    if let Some(tls) = &peer.tls {
        env.push("CORE_PEER_TLS_ENABLED", true);
        env.push("CORE_PEER_TLS_KEY_FILE", &tls.server_key);
        env.push("CORE_PEER_TLS_CERT_FILE", &tls.server_crt);
        env.push("CORE_PEER_TLS_ROOTCERT_FILE", &tls.ca_crt);
    }

    env
}
