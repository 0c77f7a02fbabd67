//! Console progress reporter for a running session.

use colored::Colorize;
use twentyq_application::SessionProgress;
use twentyq_domain::{Candidate, OracleReply, RoundRecord, SessionOutcome};

/// Prints each round's question, answer and split to the terminal.
pub struct ConsoleProgress;

impl SessionProgress for ConsoleProgress {
    fn on_target_selected(&self, target: &Candidate, pool_size: usize) {
        println!(
            "{}",
            format!("Target selected: {} ({} candidates)", target, pool_size).magenta()
        );
    }

    fn on_question(&self, round: usize, question: &str, is_final_guess: bool) {
        if is_final_guess {
            println!("{}", format!("Q{}: FINAL GUESS: {}", round, question).yellow());
        } else {
            println!("{}", format!("Q{}: {}", round, question).yellow());
        }
    }

    fn on_ground_truth(&self, _round: usize, answer: &OracleReply) {
        println!("{}", format!("Oracle: {}", answer).cyan());
    }

    fn on_round_complete(&self, record: &RoundRecord) {
        let line = format!(
            "After Q{}: yes={}, no={}, deviation={:.3}, survivors={}",
            record.index,
            record.yes_count,
            record.no_count,
            record.deviation,
            record.survivors_after
        );
        println!("{}", line.magenta());
        if record.inconsistency {
            println!("{}", "Warning: oracle inconsistency detected this round".red());
        }
    }

    fn on_session_end(&self, outcome: &SessionOutcome) {
        let line = format!("Session over: {}", outcome);
        if outcome.is_success() {
            println!("{}", line.green());
        } else {
            println!("{}", line.red());
        }
    }
}
