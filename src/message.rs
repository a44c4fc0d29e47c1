use std::io::Cursor;

use tracing::instrument;

use crate::{DecodeError, Flags, Header, Question, Record, Wire};

/// A whole DNS message: header plus the four positional sections.
///
/// Sections are not self-delimited on the wire; the header counts alone
/// say where one ends and the next begins. The `add_*` mutators keep
/// those counts in sync, and a decoded `Message` is never mutated.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<Record>,
    pub authorities: Vec<Record>,
    pub additionals: Vec<Record>,
}

impl Message {
    pub fn new(header: Header) -> Self {
        Self {
            header,
            ..Default::default()
        }
    }

    /// Builds an iterative query: one question, all other counts zero,
    /// and flags zero. Recursion-desired stays clear on purpose; we are
    /// the ones walking the delegation chain, and authoritative servers
    /// are queried iteratively.
    pub fn query(id: u16, question: Question) -> Self {
        let mut message = Self::new(Header::new(id, Flags::default()));
        message.add_question(question);
        message
    }

    pub fn add_question(&mut self, question: Question) {
        self.header.num_questions += 1;
        self.questions.push(question)
    }

    pub fn add_answer(&mut self, record: Record) {
        self.header.num_answers += 1;
        self.answers.push(record)
    }

    pub fn add_authority(&mut self, record: Record) {
        self.header.num_authorities += 1;
        self.authorities.push(record)
    }

    pub fn add_additional(&mut self, record: Record) {
        self.header.num_additionals += 1;
        self.additionals.push(record)
    }
}

impl Wire for Message {
    #[instrument(level = "debug", skip_all)]
    fn to_bytes(&self) -> Vec<u8> {
        let mut ret = self.header.to_bytes();

        for question in &self.questions {
            ret.extend_from_slice(&question.to_bytes());
        }

        for record in self
            .answers
            .iter()
            .chain(&self.authorities)
            .chain(&self.additionals)
        {
            ret.extend_from_slice(&record.to_bytes());
        }

        ret
    }

    #[instrument(level = "debug", skip_all)]
    fn from_bytes(bytes: &mut Cursor<&[u8]>) -> Result<Self, DecodeError> {
        let header = Header::from_bytes(bytes)?;

        let mut questions = Vec::new();
        for _ in 0..header.num_questions {
            questions.push(Question::from_bytes(bytes)?);
        }

        let mut answers = Vec::new();
        for _ in 0..header.num_answers {
            answers.push(Record::from_bytes(bytes)?);
        }

        let mut authorities = Vec::new();
        for _ in 0..header.num_authorities {
            authorities.push(Record::from_bytes(bytes)?);
        }

        let mut additionals = Vec::new();
        for _ in 0..header.num_additionals {
            additionals.push(Record::from_bytes(bytes)?);
        }

        Ok(Self {
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }
}
