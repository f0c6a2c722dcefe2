//! Canned simulation scenarios.

use crate::error::EngineResult;
use crate::script::ScriptBuilder;
use crate::simulation::Simulation;
use depotsim_types::ActorId;

/// Builds the classic three-warehouse demo: a send/deliver cycle
/// W1 → W2 → W3 → W1, six events in total.
///
/// Each delivery carries the causal knowledge accumulated so far, so by the
/// last event W1 has learned of every warehouse's sends.
pub fn supply_chain_demo() -> EngineResult<Simulation> {
    let w1 = ActorId::new(0);
    let w2 = ActorId::new(1);
    let w3 = ActorId::new(2);

    let mut script = ScriptBuilder::new();
    let m1 = script.send(w1, [w2], "Shipment dispatched from W1");
    script.deliver(m1, w2);
    let m2 = script.send(w2, [w3], "Shipment en route from W2");
    script.deliver(m2, w3);
    let m3 = script.send(w3, [w1], "Shipment delivered to W3");
    script.deliver(m3, w1);

    Simulation::new(["W1", "W2", "W3"], script.build())
}
