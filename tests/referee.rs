use pitboss::engine::engine::Engine;
use pitboss::players::table::Table;
use pitboss::protocol::clause::Clause;
use pitboss::round::action::Action;
use pitboss::round::state::Round;
use pitboss::round::state::RoundState;
use pitboss::session::session::Session;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::path::Path;
use std::time::Duration;

/// Connectionless sessions always answer the default action, so the whole
/// match folds out deterministically: the button surrenders its small blind
/// every hand, seats alternate, and every scheduled hand completes.
#[test]
fn match_completes_without_participants() {
    let a = Session::new("alice", Path::new("no/such/dir"), 58011, Duration::from_secs(30));
    let b = Session::new("bob", Path::new("no/such/dir"), 58012, Duration::from_secs(30));
    let transcript = Engine::new(a, b).run(4);
    let lines = transcript.lines();
    assert_eq!(lines.iter().filter(|l| l.ends_with("folds")).count(), 4);
    assert_eq!(lines.iter().filter(|l| l.starts_with("Round #")).count(), 4);
    assert_eq!(
        lines.iter().filter(|l| l.contains("posts the blind")).count(),
        8
    );
    assert_eq!(lines.last().unwrap(), "Final, alice (0), bob (0)");
}

/// The participant-side Table, fed the same clause stream the engine emits,
/// tracks the referee's RoundState chip-for-chip through a scripted hand.
#[test]
fn participant_view_tracks_the_referee() {
    let mut rng = SmallRng::seed_from_u64(11);
    let mut state = RoundState::deal(&mut rng);
    let mut table = Table::deal(0, state.hands[0]);
    let script = [
        Action::Call,
        Action::Check,
        Action::Raise(10),
        Action::Call,
        Action::Check,
        Action::Check,
        Action::Raise(50),
        Action::Fold,
    ];
    for action in script {
        let street = state.street;
        match state.proceed(action) {
            Round::Live(next) => {
                table.apply(&Clause::Move(action));
                if next.street != street {
                    table.apply(&Clause::Board(next.board().to_vec()));
                }
                assert_eq!(table.pips, next.pips);
                assert_eq!(table.stacks, next.stacks);
                state = next;
            }
            Round::Done(terminal) => {
                assert_eq!(terminal.deltas, [-12, 12]);
                return;
            }
        }
    }
    panic!("script never settled the hand");
}
