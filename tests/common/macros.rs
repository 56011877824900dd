/// Asserts that an outcome was accepted, printing the reason otherwise.
#[macro_export]
macro_rules! assert_accepted {
    ($outcome:expr) => {
        let outcome = $outcome;
        assert!(
            outcome.is_accepted(),
            "expected acceptance, got rejection: {:?}",
            outcome.reason()
        );
    };
}

/// Asserts that an outcome was rejected, optionally with an exact reason.
#[macro_export]
macro_rules! assert_rejected {
    ($outcome:expr) => {
        let outcome = $outcome;
        assert!(
            !outcome.is_accepted(),
            "expected rejection, got {:?}",
            outcome.event()
        );
    };
    ($outcome:expr, $reason:expr) => {
        let outcome = $outcome;
        assert_eq!(outcome.reason(), Some($reason), "rejection reason mismatch");
    };
}

/// Asserts a creature's stage and sub-type.
#[macro_export]
macro_rules! assert_form {
    ($creature:expr, $stage:expr, $sub_type:expr) => {
        let creature = $creature;
        assert_eq!(
            (creature.lifecycle.stage, creature.lifecycle.sub_type),
            ($stage, $sub_type),
            "creature {} has the wrong form",
            creature.identity.id
        );
    };
}

/// Asserts the score invariant on every creature in the world.
#[macro_export]
macro_rules! assert_scores_consistent {
    ($world:expr) => {
        for creature in $world.creatures() {
            assert_eq!(
                creature.overall_score(),
                creature.care.happiness + creature.lifecycle.age,
                "score drift on creature {}",
                creature.identity.id
            );
        }
    };
}
