//! # Simulator Lifecycle Tests
//!
//! State transitions, run isolation, the step guard and register access.

use armsim_core::common::{ExecutionError, RegisterError};
use armsim_core::config::Config;
use armsim_core::core::cpu::HaltReason;
use armsim_core::{EngineState, ExecutionResult, Simulator};
use pretty_assertions::assert_eq;

use crate::common::harness::assemble;

const COUNTER: &str = "
ldr x1, =counter
ldr x0, [x1]
add x0, x0, 1
str x0, [x1]
.data
counter: .quad 0
";

fn with_step_limit(limit: u64) -> Simulator {
    let mut config = Config::default();
    config.general.step_limit = Some(limit);
    Simulator::new(config)
}

#[test]
fn test_state_transitions() {
    let mut sim = Simulator::new(Config::default());
    assert_eq!(sim.state(), EngineState::Empty);
    assert!(sim.program().is_none());

    let _ = sim.parse(["mov x0, 1"]).unwrap();
    assert_eq!(sim.state(), EngineState::Ready);

    assert!(sim.run().is_halted());
    assert_eq!(sim.state(), EngineState::Halted);

    let _ = sim.parse(["mov x0, 0", "br x0", "nop"]).unwrap();
    assert_eq!(sim.state(), EngineState::Ready);
    let _ = sim.parse(["mov x0, 9", "br x0"]).unwrap();
    assert!(!sim.run().is_halted());
    assert_eq!(sim.state(), EngineState::Faulted);
}

#[test]
fn test_run_without_program() {
    let mut sim = Simulator::new(Config::default());
    assert_eq!(
        sim.run(),
        ExecutionResult::Faulted {
            error: ExecutionError::NoProgramLoaded,
            pc: 0,
            steps: 0
        }
    );
    assert_eq!(sim.state(), EngineState::Faulted);
}

#[test]
fn test_failed_parse_unloads_program() {
    let mut sim = Simulator::new(Config::default());
    let _ = sim.parse(["nop"]).unwrap();
    assert!(sim.parse(["frob"]).is_err());
    assert_eq!(sim.state(), EngineState::Empty);
    assert!(sim.program().is_none());
    assert_eq!(sim.run().error(), Some(&ExecutionError::NoProgramLoaded));
}

#[test]
fn test_repeated_runs_are_independent() {
    let mut sim = Simulator::new(Config::default());
    let _ = sim.parse(COUNTER.lines()).unwrap();
    for _ in 0..3 {
        assert!(sim.run().is_halted());
        assert_eq!(sim.reg("x0"), Ok(1));
    }
}

#[test]
fn test_console_is_cleared_between_runs() {
    let mut sim = Simulator::new(Config::default());
    let _ = sim
        .parse([
            "mov x0, 1",
            "ldr x1, =c",
            "mov x2, 1",
            "mov x8, 64",
            "svc 0",
            ".data",
            "c: .ascii \"!\"",
        ])
        .unwrap();
    let _ = sim.run();
    let _ = sim.run();
    assert_eq!(sim.console().stdout(), b"!");
}

#[test]
fn test_instances_share_nothing() {
    let mut a = Simulator::new(Config::default());
    let mut b = Simulator::new(Config::default());
    let _ = a.parse(["mov x0, 1"]).unwrap();
    let _ = b.parse(["mov x0, 2"]).unwrap();
    let _ = a.run();
    assert_eq!(b.reg("x0"), Ok(0));
    let _ = b.run();
    assert_eq!(a.reg("x0"), Ok(1));
    assert_eq!(b.reg("x0"), Ok(2));
}

#[test]
fn test_step_limit_stops_infinite_loop() {
    let mut sim = with_step_limit(100);
    let _ = sim.parse(["loop: b loop"]).unwrap();
    assert_eq!(
        sim.run(),
        ExecutionResult::Faulted {
            error: ExecutionError::StepLimitExceeded { limit: 100 },
            pc: 0,
            steps: 100
        }
    );
}

#[test]
fn test_step_limit_allows_exact_completion() {
    let mut sim = with_step_limit(3);
    let _ = sim.parse(["nop", "nop", "nop"]).unwrap();
    assert_eq!(
        sim.run(),
        ExecutionResult::Halted {
            reason: HaltReason::EndOfProgram,
            steps: 3
        }
    );
}

#[test]
fn test_load_prebuilt_program() {
    let program = assemble("mov x0, 5\nadd x0, x0, x0");
    let mut sim = Simulator::new(Config::default());
    assert_eq!(sim.load(program.clone()), &program);
    assert_eq!(sim.state(), EngineState::Ready);
    assert!(sim.run().is_halted());
    assert_eq!(sim.reg("x0"), Ok(10));
}

#[test]
fn test_register_access() {
    let mut sim = Simulator::new(Config::default());
    let _ = sim.parse(["mov lr, -1", "mov fp, 2"]).unwrap();
    let _ = sim.run();
    assert_eq!(sim.reg("x30"), Ok(-1));
    assert_eq!(sim.reg("FP"), Ok(2));
    assert_eq!(sim.registers().non_zero().count(), 2);
    assert_eq!(
        sim.reg("r0"),
        Err(RegisterError::UnknownRegister("r0".into()))
    );
}

#[test]
fn test_fault_preserves_partial_state() {
    let mut sim = Simulator::new(Config::default());
    let _ = sim.parse(["mov x3, 4", "ldr x0, [xzr]", "mov x4, 1"]).unwrap();
    let result = sim.run();
    assert_eq!(result.steps(), 1);
    assert_eq!(sim.reg("x3"), Ok(4));
    assert_eq!(sim.reg("x4"), Ok(0));
    assert_eq!(sim.cpu().pc, 1);
}

#[test]
fn test_unbuildable_memory_faults_the_run() {
    let mut config = Config::default();
    config.memory.size = usize::MAX;
    let mut sim = Simulator::new(config);
    let _ = sim.parse(["_start: mov x0, 1"]).unwrap();
    assert_eq!(
        sim.run(),
        ExecutionResult::Faulted {
            error: ExecutionError::MemoryUnavailable {
                base: 0x1_0000,
                size: usize::MAX
            },
            pc: 0,
            steps: 0
        }
    );
    assert_eq!(sim.state(), EngineState::Faulted);
    assert_eq!(sim.reg("x0"), Ok(0));
}
