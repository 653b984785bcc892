mod common;

use common::*;

use ls8_vm::trace::NoopTrace;
use ls8_vm::{Machine, State};
use proptest::prelude::*;

proptest! {
    #[test]
    fn ldi_then_prn_prints_the_immediate(r in 0u8..8, v in any::<u8>()) {
        let (_, printed, result) = run(&[LDI, r, v, PRN, r, HLT, 0, 0]);

        prop_assert_eq!(result.unwrap(), State::Halted);
        prop_assert_eq!(printed, vec![v]);
    }

    #[test]
    fn add_and_mul_wrap(a in any::<u8>(), b in any::<u8>()) {
        let (vm, _, result) = run(&[
            LDI, 0, a,
            LDI, 1, b,
            LDI, 2, a,
            ADD, 0, 1,
            MUL, 2, 1,
            HLT, 0, 0,
        ]);

        prop_assert_eq!(result.unwrap(), State::Halted);
        prop_assert_eq!(vm.cpu().registers.get(0).unwrap(), ((a as u16 + b as u16) % 256) as u8);
        prop_assert_eq!(vm.cpu().registers.get(2).unwrap(), ((a as u16 * b as u16) % 256) as u8);
    }

    #[test]
    fn push_pop_round_trip(r in 0u8..7, v in any::<u8>(), clobber in any::<u8>()) {
        let mut vm = Machine::with_program(&[
            LDI, r, v,
            PUSH, r,
            LDI, r, clobber,
            POP, r,
            HLT, 0, 0,
        ]).unwrap();
        let sp = vm.cpu().registers.sp();

        prop_assert_eq!(vm.run(&mut Vec::<u8>::new(), &mut NoopTrace).unwrap(), State::Halted);
        prop_assert_eq!(vm.cpu().registers.get(r).unwrap(), v);
        prop_assert_eq!(vm.cpu().registers.sp(), sp);
    }

    #[test]
    fn ret_returns_after_the_call(padding in 0usize..20) {
        // `padding` no-effect loads, then `CALL R1` into a subroutine made of a single `RET`.
        let mut image = vec![LDI, 1, 0];
        for _ in 0..padding {
            image.extend_from_slice(&[LDI, 0, 0]);
        }
        let call_at = image.len();
        image.extend_from_slice(&[CALL, 1, HLT]);
        let subroutine = image.len();
        image.extend_from_slice(&[RET, 0, 0]);
        image[2] = subroutine as u8;

        let mut vm = Machine::with_program(&image).unwrap();
        let mut out = Vec::<u8>::new();
        while vm.cpu().pc != subroutine {
            vm.step(&mut out, &mut NoopTrace).unwrap();
        }
        vm.step(&mut out, &mut NoopTrace).unwrap();

        prop_assert_eq!(vm.cpu().pc, call_at + 2);
    }

    #[test]
    fn jeq_jumps_only_when_equal(a in any::<u8>(), b in any::<u8>()) {
        let mut vm = Machine::with_program(&[
            LDI, 0, a, // 0
            LDI, 1, b, // 3
            LDI, 2, 20, // 6
            CMP, 0, 1, // 9
            JEQ, 2, // 12
            HLT, 0, 0, 0, 0, 0, // 14
            HLT, 0, 0, // 20
        ]).unwrap();

        let mut out = Vec::<u8>::new();
        for _ in 0..5 {
            vm.step(&mut out, &mut NoopTrace).unwrap();
        }

        if a == b {
            prop_assert_eq!(vm.cpu().pc, 20);
        } else {
            prop_assert_eq!(vm.cpu().pc, 14);
        }
        prop_assert_eq!(vm.cpu().flags.is_less(), a < b);
        prop_assert_eq!(vm.cpu().flags.is_greater(), a > b);
    }

    #[test]
    fn out_of_range_register_faults(r in 8u8..) {
        let (vm, printed, result) = run(&[LDI, r, 1, PRN, 0, HLT, 0, 0]);

        prop_assert!(result.is_err());
        prop_assert_eq!(vm.state(), State::Faulted);
        prop_assert!(printed.is_empty());
    }
}
