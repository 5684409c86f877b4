//! Peer handle construction from on-disk TLS material.

use fabric_bootstrap_core::{CryptoConfigLayout, CryptoPath, NodeType, PeerContainerConfig};
use fabric_bootstrap_peer::{
    build_peer_environment, create_peer_handle, format_peer_name, PeerDescriptor, PeerEnvironment,
    PeerError, PeerMsp, PeerTlsFiles, TlsMaterial,
};
use tempfile::tempdir;

fn ca_pem() -> String {
    rcgen::generate_simple_self_signed(vec!["tlsca.org1.example.com".to_string()])
        .unwrap()
        .cert
        .pem()
}

#[test]
fn test_handle_from_cryptogen_tls_ca() {
    let dir = tempdir().unwrap();
    let layout = CryptoConfigLayout::peer_org(dir.path(), "org1.example.com");
    let tls = layout.tls_files(NodeType::Peer);
    let pem = ca_pem();
    std::fs::create_dir_all(tls.ca_cert.parent().unwrap()).unwrap();
    std::fs::write(&tls.ca_cert, &pem).unwrap();

    let material = TlsMaterial::resolve(None, Some(&tls.ca_cert)).unwrap();
    let handle = create_peer_handle(PeerDescriptor {
        peer_port: 7051,
        peer_host_name: format_peer_name("peer0", layout.domain()),
        host: None,
        tls: material,
    });

    assert_eq!(handle.url(), "grpcs://localhost:7051");
    assert_eq!(handle.pem(), Some(pem.as_str()));
    assert_eq!(
        handle.ssl_target_name_override(),
        Some("peer0.org1.example.com")
    );
}

#[test]
fn test_handle_without_tls_ca_is_plaintext() {
    let dir = tempdir().unwrap();
    let layout = CryptoConfigLayout::peer_org(dir.path(), "org1.example.com");
    let tls = layout.tls_files(NodeType::Peer);

    let material = TlsMaterial::resolve(None, Some(&tls.ca_cert)).unwrap();
    let handle = create_peer_handle(PeerDescriptor {
        peer_port: 8051,
        peer_host_name: "peer1.org1.example.com".to_string(),
        host: Some("127.0.0.1".to_string()),
        tls: material,
    });

    assert_eq!(handle.url(), "grpc://127.0.0.1:8051");
    assert!(!handle.is_tls());
}

#[test]
fn test_environment_for_cryptogen_layout() {
    let layout = CryptoConfigLayout::peer_org("/etc/hyperledger/crypto-config", "org1.example.com");
    let tls = layout.tls_files(NodeType::Peer);
    let config = PeerContainerConfig::default();

    let peer = PeerEnvironment {
        network: "bootstrap_net".to_string(),
        msp: PeerMsp {
            config_path: layout
                .node_dir(NodeType::Peer)
                .join("msp")
                .display()
                .to_string(),
            id: "Org1MSP".to_string(),
            peer_host_name_full: layout.node_full_name(),
        },
        tls: Some(PeerTlsFiles {
            server_key: tls.key.display().to_string(),
            server_crt: tls.cert.display().to_string(),
            ca_crt: tls.ca_cert.display().to_string(),
        }),
    };
    let env = build_peer_environment(&peer, &config);

    assert_eq!(env.get("CORE_PEER_ID"), Some("peer0.org1.example.com"));
    assert_eq!(
        env.get("CORE_PEER_ADDRESS"),
        Some("peer0.org1.example.com:7051")
    );
    assert_eq!(
        env.get("CORE_PEER_TLS_ROOTCERT_FILE"),
        Some(tls.ca_cert.display().to_string().as_str())
    );
    assert_eq!(env.values("GODEBUG").count(), 1);
}

#[tokio::test]
async fn test_connect_refused_is_connect_error() {
    let handle = create_peer_handle(PeerDescriptor {
        peer_port: 1,
        peer_host_name: "peer0.org1.example.com".to_string(),
        host: Some("127.0.0.1".to_string()),
        tls: TlsMaterial::Absent,
    });

    let result = handle.connect().await;

    assert!(matches!(result, Err(PeerError::Connect { .. })));
}

#[tokio::test]
async fn test_tls_connect_refused_is_connect_error() {
    let handle = create_peer_handle(PeerDescriptor {
        peer_port: 1,
        peer_host_name: "peer0.org1.example.com".to_string(),
        host: Some("127.0.0.1".to_string()),
        tls: TlsMaterial::present(ca_pem()),
    });
    assert_eq!(handle.url(), "grpcs://127.0.0.1:1");

    let result = handle.connect().await;

    assert!(matches!(result, Err(PeerError::Connect { .. })));
}
