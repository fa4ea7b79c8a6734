use anyhow::Result;
use planner::{
    AStar, Additive, Cost, EffectBlock, Heuristic, HeuristicType, NoDupFrontier, Operator, PlanResult,
    PlanningError, Problem, RelaxedGraph, State, Zero,
};

const HEURISTICS: [HeuristicType; 3] = [HeuristicType::Zero, HeuristicType::Additive, HeuristicType::RelaxedGraph];

/// A and B; one operator costing 3 that needs A (and not B), adds B, deletes A.
fn toggle() -> Result<Problem> {
    let op = Operator::new(
        "a-to-b",
        3,
        State::from_bools(&[true, false]),
        State::from_bools(&[false, true]),
        State::from_bools(&[true, false]),
    );
    Ok(Problem::new(vec!["A", "B"], vec![op])?)
}

#[test]
fn toggle_reaches_b_for_three() -> Result<()> {
    let problem = toggle()?;
    let start = problem.state(&["A"])?;
    let goal = problem.state(&["B"])?;
    for h in HEURISTICS {
        let result = problem.search(&h, &start, &goal)?;
        let plan = result.plan().expect("a plan exists");
        assert_eq!(Cost::new(3), plan.cost);
        assert_eq!(vec!["a-to-b"], plan.names(&problem));
    }
    Ok(())
}

#[test]
fn satisfied_goal_costs_nothing() -> Result<()> {
    let problem = toggle()?;
    let start = problem.state(&["A"])?;
    for h in HEURISTICS {
        let result = problem.search(&h, &start, &start)?;
        let plan = result.plan().expect("the start is a goal state");
        assert!(plan.is_empty());
        assert_eq!(Cost::ZERO, plan.cost);
    }
    // any subset of the start is satisfied as well
    let result = problem.search(&Zero, &problem.state(&["A", "B"])?, &problem.state(&["B"])?)?;
    assert_eq!(Some(Cost::ZERO), result.cost());
    Ok(())
}

#[test]
fn goals_nobody_produces_yield_no_plan() -> Result<()> {
    let problem = toggle()?;
    let start = problem.state(&["A"])?;
    // nothing ever makes A and B hold together
    let goal = problem.state(&["A", "B"])?;
    for h in HEURISTICS {
        assert_eq!(PlanResult::NotFound, problem.search(&h, &start, &goal)?);
    }

    let problem = Problem::new(vec!["A", "B", "C"], vec![])?;
    let result = problem.search(&Additive, &problem.state(&["A"])?, &problem.state(&["C"])?)?;
    assert!(!result.is_found());
    assert_eq!(None, result.plan());
    Ok(())
}

#[test]
fn relaxed_reachability_is_not_enough() -> Result<()> {
    // under relaxation `take` keeps `free`, so {held, free} looks reachable
    let ops = vec![Operator::new(
        "take",
        1,
        State::from_bools(&[true, false]),
        State::from_bools(&[false, true]),
        State::from_bools(&[true, false]),
    )];
    let problem = Problem::new(vec!["free", "held"], ops)?;
    let start = problem.state(&["free"])?;
    let goal = problem.state(&["free", "held"])?;

    assert_eq!(Cost::new(1), RelaxedGraph.estimate(problem.operators(), &start, &goal));
    assert_eq!(PlanResult::NotFound, problem.search(&RelaxedGraph, &start, &goal)?);
    Ok(())
}

#[test]
fn compound_operators_are_charged_once() -> Result<()> {
    // "unlock" opens the door and, once open, lets the light in
    let n = 4;
    let s = |props: &[usize]| State::with_true(n, props.iter().copied());
    let light = EffectBlock::new(s(&[2]), s(&[3]), s(&[]));
    let ops = vec![
        Operator::new("unlock", 2, s(&[0]), s(&[2]), s(&[1])).with_sub_effect(light),
        Operator::new("lamp", 5, s(&[]), s(&[3]), s(&[])),
    ];
    let problem = Problem::new(vec!["key", "locked", "open", "lit"], ops)?;
    let start = s(&[0, 1]);
    let goal = s(&[3]);

    assert_eq!(Cost::new(2), Additive.estimate(problem.operators(), &start, &goal));
    assert_eq!(Cost::new(2), RelaxedGraph.estimate(problem.operators(), &start, &goal));
    for h in HEURISTICS {
        let result = problem.search(&h, &start, &goal)?;
        assert_eq!(Some(Cost::new(2)), result.cost(), "with {h}");
        assert_eq!(vec!["unlock"], result.plan().map(|p| p.names(&problem)).unwrap_or_default());
    }
    Ok(())
}

#[test]
fn sub_effects_that_never_fire_do_not_block_the_search() -> Result<()> {
    // "light" also adds "lit" when "power" holds, which never happens
    let n = 4;
    let s = |props: &[usize]| State::with_true(n, props.iter().copied());
    let ops = vec![
        Operator::new("stand", 1, s(&[3]), s(&[0]), s(&[])),
        Operator::new("light", 1, s(&[0]), s(&[1]), s(&[])).with_sub_effect(EffectBlock::new(s(&[2]), s(&[1]), s(&[]))),
    ];
    let problem = Problem::new(vec!["ready", "lit", "power", "start"], ops)?;
    let start = problem.state(&["start"])?;
    let goal = problem.state(&["lit"])?;
    for h in HEURISTICS {
        assert!(h.estimate(problem.operators(), &start, &goal).is_finite(), "with {h}");
        let result = problem.search(&h, &start, &goal)?;
        assert_eq!(Some(Cost::new(2)), result.cost(), "with {h}");
        assert_eq!(vec!["stand", "light"], result.plan().map(|p| p.names(&problem)).unwrap_or_default());
    }
    Ok(())
}

#[test]
fn apply_touches_only_its_effects() {
    let n = 6;
    let s = |props: &[usize]| State::with_true(n, props.iter().copied());
    let op = Operator::new("op", 1, s(&[0]), s(&[1, 2]), s(&[2, 3]));
    for bits in 0..64_u32 {
        let props = (0..n).filter(|p| bits & (1 << p) != 0).collect::<Vec<_>>();
        let state = s(&props);
        if !op.is_applicable(&state) {
            assert_eq!(state, op.apply(&state));
            continue;
        }
        let next = op.apply(&state);
        assert!(next.get(1) && next.get(2));
        assert!(!next.get(3));
        for p in [0, 4, 5] {
            assert_eq!(state.get(p), next.get(p));
        }
    }
}

#[test]
fn malformed_inputs_are_rejected_before_search() -> Result<()> {
    let op = Operator::new("short", 1, State::new(1), State::new(2), State::new(2));
    let err = Problem::new(vec!["A", "B"], vec![op]).unwrap_err();
    assert_eq!(
        PlanningError::DimensionMismatch {
            operator: "short".to_owned(),
            field: "preconditions",
            expected: 2,
            found: 1,
        },
        err
    );
    assert!(err.to_string().contains("short"));

    let problem = toggle()?;
    let err = AStar::new(&problem, &Zero)
        .search_with(&mut NoDupFrontier::new(), &State::new(2), &State::new(5))
        .unwrap_err();
    assert!(matches!(err, PlanningError::StateDimension { what: "goal", expected: 2, found: 5 }));
    Ok(())
}

#[test]
fn parallel_search_on_a_corridor() -> Result<()> {
    let n = 12;
    let at = |room: usize| State::with_true(n, [room]);
    let mut ops = vec![];
    for room in 0..n - 1 {
        ops.push(Operator::new(format!("forth-{room}"), 1, at(room), at(room + 1), at(room)));
        ops.push(Operator::new(format!("back-{}", room + 1), 1, at(room + 1), at(room), at(room + 1)));
    }
    ops.push(Operator::new("teleport", 7, at(0), at(n - 1), at(0)));
    let rooms = (0..n).map(|r| format!("at-{r}")).collect::<Vec<_>>();
    let problem = Problem::new(rooms, ops)?;

    for h in HEURISTICS {
        let mut astar = AStar::new(&problem, &h).with_nb_threads(4);
        let result = astar.search(&at(0), &at(n - 1))?;
        assert_eq!(Some(Cost::new(7)), result.cost(), "with {h}");
        assert_eq!(vec!["teleport"], result.plan().map(|p| p.names(&problem)).unwrap_or_default());
    }
    Ok(())
}
