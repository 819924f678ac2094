//! Latin square scenarios, including host-driven solving.

use pretty_assertions::assert_eq;
use tessera_board::HostConfig;
use tessera_host::{cell_renderers, format_square, HostLoop, HostOutcome};
use tessera_tests::prelude::*;

fn square(size: usize, givens: &str) -> Board<LatinSquare> {
    LatinSquare::parse(size, givens, WorldConfig::reporting())
        .unwrap()
        .into_board()
        .unwrap()
}

mod naked_singles {
    use super::*;
    use pretty_assertions::assert_eq;

    pub fn scenario() -> Scenario<LatinSquare> {
        Scenario::new("naked_singles", square(4, "1.34/2.4./.412/43.1"))
            .step("one_command", DrainBudget::count(1), |a| a.executed(1).unsolved())
            .step("rest", DrainBudget::unlimited(), |a| {
                a.fixed_point()
                    .solved()
                    .check("all cells solved", |board| board.puzzle().solved_cells() == 16)
            })
    }

    #[test]
    fn test_four_by_four_solves() {
        let board = scenario().run().unwrap();

        assert_eq!(board.puzzle().to_string(), "1234\n2143\n3412\n4321\n");
    }
}

mod contradictions {
    use super::*;

    pub fn scenario() -> Scenario<LatinSquare> {
        Scenario::new("clash", square(3, "11./.../..."))
            .step("drain", DrainBudget::unlimited(), |a| a.error("no candidates left"))
    }

    #[test]
    fn test_clashing_givens_fail() {
        scenario().run().unwrap();
    }
}

mod hosted {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_host_loop_solves_in_small_batches() {
        // GIVEN
        let mut board = square(5, ".2345/2.451/34.12/451.3/5123.");
        let host = HostLoop::new(HostConfig::new().with_sleep_cycle_ms(0)).with_max_count(2);

        // WHEN
        let summary = host.run(&mut board).unwrap();

        // THEN
        assert_eq!(summary.outcome, HostOutcome::Solved);
        assert!(summary.batches > 1);
        let registry = cell_renderers().unwrap();
        assert_eq!(
            format_square(board.puzzle(), &registry, None).unwrap(),
            "1 2 3 4 5\n2 3 4 5 1\n3 4 5 1 2\n4 5 1 2 3\n5 1 2 3 4\n"
        );
    }

    #[test]
    fn test_blank_square_stalls_under_host() {
        let mut board = square(3, ".........");

        let summary = HostLoop::new(HostConfig::new().with_sleep_cycle_ms(0))
            .run(&mut board)
            .unwrap();

        assert_eq!(summary.outcome, HostOutcome::Stalled);
        assert_eq!(summary.executed, 9);
    }
}
