//! attestia-node — drives one attestation cycle end to end.
//!
//! Cycle sequence (§2 data flow):
//!   1. Read a cycle fixture (domain commands + out-of-band intents/chain
//!      observations) and append its commands as events on C2.
//!   2. Replay C2 from scratch to project C4 (ledger) and C5 (registrar).
//!   3. Reconcile intents, the ledger, and chain events (C7) into a signed
//!      attestation.
//!   4. Fold the attestation hash into the running Merkle log (C9) and
//!      build its inclusion proof.
//!   5. Compute the Global State Hash and export a state bundle (C8).
//!   6. Aggregate governance signatures over the bundle and witness it on
//!      the mock external chain (C11/C12).
//!   7. Independently replay-verify the bundle (C10) and log the verdict.
//!
//! The event log, snapshots, and attestation history persist across cycles
//! under `--data-dir`; with `--interval-secs` the binary repeats the same
//! fixture on a timer instead of exiting after one pass.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use attestia_core::sha256_canonical;
use attestia_crypto::KeyPair;
use attestia_eventstore::{AppendOptions as EventAppendOptions, ExpectedVersion, FileEventStore};
use attestia_governance::{
    aggregate_signatures, build_canonical_signing_payload, GovernancePolicy, GovernanceStore,
    SignatureEntry,
};
use attestia_gsh::create_state_bundle;
use attestia_ledger::EntryFilter;
use attestia_merkle::build_proof_package;
use attestia_reconciler::{reconcile, ReconcilerInput};
use attestia_snapshot::FileSnapshotStore;
use attestia_verifier::{VerificationOptions, Verdict, VerifierNode};
use attestia_witness::{submit_multi_sig, verify_witness, MockWitnessClient, RetryPolicy};

mod commands;
mod cycle;
mod projector;
mod schema;

use commands::{ledger_events, registrar_events};
use cycle::CycleInput;

const ATTESTATION_LOG_STREAM: &str = "attestation-log";
const WITNESS_CHAIN_ID: &str = "attestia-witness-chain";

#[derive(Parser, Debug)]
#[command(
    name = "attestia-node",
    version,
    about = "Attestia attestation node — event-sourced financial attestation infrastructure"
)]
struct Args {
    /// Directory for the persistent event log, snapshots, and attestation history.
    #[arg(long, default_value = "./attestia-data")]
    data_dir: PathBuf,

    /// Path to a cycle fixture JSON file describing this cycle's commands and observations.
    #[arg(long)]
    cycle: PathBuf,

    /// Identity this node reports itself as in the replay verifier's report.
    #[arg(long, default_value = "attestia-verifier-1")]
    verifier_id: String,

    /// Reject bundles that omit per-chain hashes during replay verification.
    #[arg(long)]
    strict: bool,

    /// Number of ephemeral governance signers to bootstrap.
    #[arg(long, default_value_t = 3)]
    signers: u32,

    /// Quorum weight required to witness an attestation.
    #[arg(long, default_value_t = 2)]
    quorum: u32,

    /// Re-run the same cycle fixture on this interval instead of exiting after one pass.
    #[arg(long)]
    interval_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,attestia=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();
    info!("Attestia node starting");

    std::fs::create_dir_all(&args.data_dir)
        .with_context(|| format!("creating data dir {}", args.data_dir.display()))?;

    let event_store =
        FileEventStore::open(args.data_dir.join("events.jsonl")).context("opening event store")?;
    let snapshot_store =
        FileSnapshotStore::open(args.data_dir.join("snapshots")).context("opening snapshot store")?;
    let catalog = schema::build_catalog();

    let (signers, policy) = bootstrap_governance(args.signers, args.quorum);
    info!(signer_count = signers.len(), quorum = args.quorum, "governance bootstrapped");

    let witness_client = MockWitnessClient::new(WITNESS_CHAIN_ID);

    loop {
        run_cycle(
            &args,
            &event_store,
            &snapshot_store,
            &catalog,
            &signers,
            &policy,
            &witness_client,
        )
        .await?;

        match args.interval_secs {
            Some(secs) => tokio::time::sleep(std::time::Duration::from_secs(secs)).await,
            None => break,
        }
    }

    Ok(())
}

/// Generates `count` ephemeral ed25519 signers and a governance policy
/// requiring `quorum` total weight to sign off an attestation.
///
/// # Warning
/// These keys are not persisted and are not reproducible across restarts.
/// Only suitable for local development — a production deployment must load
/// signer identities from a durable key store.
fn bootstrap_governance(count: u32, quorum: u32) -> (Vec<KeyPair>, GovernancePolicy) {
    warn!("No durable signer store configured. Generating ephemeral signers — DO NOT USE IN PRODUCTION.");
    let mut store = GovernanceStore::new();
    let mut keys = Vec::new();
    for i in 0..count.max(1) {
        let kp = KeyPair::generate();
        store
            .add_signer(&kp.address, &format!("signer-{i}"), 1, "attestia-node-bootstrap")
            .expect("freshly generated addresses never collide");
        keys.push(kp);
    }
    store
        .change_quorum(quorum.min(count.max(1)), "attestia-node-bootstrap")
        .expect("quorum bounded by total bootstrap weight");
    (keys, store.get_current_policy())
}

async fn run_cycle(
    args: &Args,
    event_store: &FileEventStore,
    snapshot_store: &FileSnapshotStore,
    catalog: &attestia_schema::SchemaCatalog,
    signers: &[KeyPair],
    policy: &GovernancePolicy,
    witness_client: &MockWitnessClient,
) -> anyhow::Result<()> {
    let input = CycleInput::load(&args.cycle)?;

    append_commands(event_store, &input)?;

    let ledger = projector::project_ledger(event_store, catalog);
    let registrar = projector::project_registrar(event_store, catalog);
    let ledger_snapshot = ledger.snapshot();
    let registrar_snapshot = registrar.snapshot();
    info!(
        accounts = ledger_snapshot.accounts.len(),
        states = registrar_snapshot.states.len(),
        "projections rebuilt"
    );

    let reconciliation = reconcile(
        &ReconcilerInput {
            intents: input.intents.clone(),
            ledger_entries: ledger.get_entries(&EntryFilter::default()),
            chain_events: input.chain_events.clone(),
        },
        "attestia-node",
    );
    info!(
        matched = reconciliation.totals.matched_count,
        mismatches = reconciliation.totals.mismatch_count,
        missing = reconciliation.totals.missing_count,
        "reconciliation complete"
    );

    let attestation_hash = sha256_canonical(&reconciliation.attestation);
    let log = append_to_attestation_log(snapshot_store, &attestation_hash)?;
    let proof_package = build_proof_package(&log, log.len() - 1, reconciliation.attestation.clone())
        .context("building merkle inclusion proof for this cycle's attestation")?;
    info!(merkle_root = %proof_package.merkle_root, leaf_count = log.len(), "attestation folded into merkle log");

    let bundle = create_state_bundle(ledger_snapshot, registrar_snapshot, log.clone(), None);

    let payload_hash =
        build_canonical_signing_payload(&attestation_hash, reconciliation.attestation.attested_at, policy);
    let sigs: Vec<SignatureEntry> = signers
        .iter()
        .map(|kp| SignatureEntry {
            address: kp.address.clone(),
            signature: kp.sign(payload_hash.as_bytes()).to_hex(),
        })
        .collect();
    let aggregated = aggregate_signatures(sigs, policy, &payload_hash)
        .context("aggregating governance signatures over this cycle's attestation")?;

    witness_client.queue_outcome(Ok((format!("tx-{}", &attestation_hash[..16]), 1)));
    let witness_payload = witness_content(&reconciliation.attestation.report_id, &bundle.bundle_hash);
    let record = submit_multi_sig(
        witness_client,
        "attestia-witness-account",
        &witness_payload,
        &aggregated,
        policy,
        &RetryPolicy::default(),
    )
    .await
    .map_err(|e| anyhow::anyhow!("witnessing attestation: {e}"))?;

    let verification = verify_witness(witness_client, &record);
    if !verification.verified {
        warn!(discrepancies = ?verification.discrepancies, "witness verification found discrepancies");
    } else {
        info!(tx_hash = %record.tx_hash, chain_id = %record.chain_id, "attestation witnessed");
    }

    let mut verifier = VerifierNode::new();
    let report = verifier.verify(
        &bundle,
        &VerificationOptions {
            verifier_id: args.verifier_id.clone(),
            label: Some("node-self-check".to_string()),
            strict_mode: args.strict,
        },
    );
    match report.verdict {
        Verdict::Pass => info!(report_id = %report.report_id, "replay verification passed"),
        Verdict::Fail => warn!(
            report_id = %report.report_id,
            discrepancies = ?report.discrepancies,
            "replay verification failed"
        ),
    }

    Ok(())
}

fn append_commands(event_store: &FileEventStore, input: &CycleInput) -> anyhow::Result<()> {
    let to_ledger = ledger_events(input);
    if !to_ledger.is_empty() {
        event_store
            .append(
                commands::LEDGER_STREAM,
                &to_ledger,
                EventAppendOptions { expected_version: Some(ExpectedVersion::Any) },
            )
            .context("appending ledger commands")?;
    }

    let to_registrar = registrar_events(input);
    if !to_registrar.is_empty() {
        event_store
            .append(
                commands::REGISTRAR_STREAM,
                &to_registrar,
                EventAppendOptions { expected_version: Some(ExpectedVersion::Any) },
            )
            .context("appending registrar commands")?;
    }

    Ok(())
}

/// Appends `attestation_hash` to the persisted leaf log and returns the
/// full log so far. The log is the single source of truth for the Merkle
/// tree built each cycle — nothing is ever removed from it.
fn append_to_attestation_log(store: &FileSnapshotStore, attestation_hash: &str) -> anyhow::Result<Vec<String>> {
    let mut log: Vec<String> = store
        .load(ATTESTATION_LOG_STREAM)
        .map(|snap| serde_json::from_value(snap.state).unwrap_or_default())
        .unwrap_or_default();
    log.push(attestation_hash.to_string());
    let version = log.len() as u64;
    store
        .save(ATTESTATION_LOG_STREAM, version, serde_json::to_value(&log)?)
        .context("saving attestation log")?;
    Ok(log)
}

/// Builds the witnessed memo payload: the reconciliation report id and
/// bundle hash, plus a `hash` field covering both so [`verify_witness`]
/// can detect tampering with the memo independently of the chain client.
fn witness_content(report_id: &str, bundle_hash: &str) -> serde_json::Value {
    let content = serde_json::json!({ "reportId": report_id, "bundleHash": bundle_hash });
    let hash = sha256_canonical(&content);
    let mut with_hash = content;
    with_hash["hash"] = serde_json::Value::String(hash);
    with_hash
}
