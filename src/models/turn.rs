use serde::{Deserialize, Serialize};

/// Conversational role of a speaker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Interviewer,
    Respondent,
}

impl Speaker {
    /// Display label used in human-readable output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Interviewer => "Interviewer",
            Self::Respondent => "Respondent",
        }
    }
}

/// One utterance in the conversation - immutable once transcribed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Who spoke
    pub speaker: Speaker,
    /// The utterance text - never changed by the pipeline
    pub text: String,
    /// Ordinal position of this turn in the transcript
    pub timestamp: u64,
}

/// One side of a question/answer exchange, carried into the flow graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeTurn {
    pub text: String,
    pub timestamp: u64,
    pub speaker: Speaker,
}

impl ExchangeTurn {
    fn from_turn(turn: &Turn) -> Self {
        Self {
            text: turn.text.clone(),
            timestamp: turn.timestamp,
            speaker: turn.speaker,
        }
    }
}

/// Pair interviewer turns with the respondent turn that follows each one.
///
/// Each interviewer turn opens a question; the next respondent turn (if any)
/// closes it as the answer. A truncated conversation yields fewer answers
/// than questions. Consecutive turns by the same speaker stay in order but
/// only open/close one exchange each.
pub fn pair_exchanges(turns: &[Turn]) -> (Vec<ExchangeTurn>, Vec<ExchangeTurn>) {
    let mut questions = Vec::new();
    let mut answers = Vec::new();

    for turn in turns {
        match turn.speaker {
            Speaker::Interviewer => {
                questions.push(ExchangeTurn::from_turn(turn));
            }
            Speaker::Respondent => {
                // An answer belongs to the most recent unanswered question
                if answers.len() < questions.len() {
                    answers.push(ExchangeTurn::from_turn(turn));
                }
            }
        }
    }

    (questions, answers)
}
