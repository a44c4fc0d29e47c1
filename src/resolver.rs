use std::fmt::Display;
use std::io::Cursor;
use std::net::Ipv4Addr;
use std::sync::Mutex;

use async_recursion::async_recursion;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::{
    Message, Name, Question, Record, RecordData, RecordType, ResolveError, Transport, Wire,
};

/// a.root-servers.net, where every resolution starts.
pub const ROOT_SERVER: Ipv4Addr = Ipv4Addr::new(198, 41, 0, 4);

/// Delegation hops allowed within one resolution before giving up. The
/// public hierarchy needs single digits; anything past this is a loop
/// or a hostile chain.
const MAX_HOPS: usize = 16;

/// Nesting allowed for resolving glue-less referral nameservers.
const MAX_DEPTH: usize = 8;

/// What a resolution produced: an address for A queries, the zone's
/// nameserver name for NS queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Address(Ipv4Addr),
    Nameserver(Name),
}

impl Display for Resolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Address(addr) => addr.fmt(f),
            Self::Nameserver(name) => name.fmt(f),
        }
    }
}

/// Iterative resolver: walks the delegation chain from a root server
/// down to an authoritative answer, one query per hop, deciding the
/// next server from the response it just decoded.
pub struct Resolver<T> {
    transport: T,
    // Query ids must be unpredictable across queries; the rng lives
    // here rather than in process-global state, behind a mutex so
    // `resolve` can take `&self`.
    ids: Mutex<StdRng>,
}

impl<T: Transport + Sync> Resolver<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            ids: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub async fn resolve(&self, domain: &str, type_: RecordType) -> Result<Resolved, ResolveError> {
        let name: Name = domain.parse().map_err(ResolveError::Encode)?;
        self.resolve_at_depth(&name, type_, 0).await
    }

    #[async_recursion]
    async fn resolve_at_depth(
        &self,
        name: &Name,
        type_: RecordType,
        depth: usize,
    ) -> Result<Resolved, ResolveError> {
        if depth > MAX_DEPTH {
            return Err(ResolveError::RecursionLimit);
        }

        let mut server = ROOT_SERVER;

        for _ in 0..MAX_HOPS {
            info!(%server, %name, ?type_, "querying");

            let query = Message::query(self.next_id(), Question::new(name.clone(), type_));
            let response = self.transport.send(server, &query.to_bytes()).await?;
            let message = Message::from_bytes(&mut Cursor::new(&response[..]))?;

            // An NS query is answered by an NS record's name data.
            if type_ == RecordType::Ns {
                if let Some(ns) = first_ns(&message.answers) {
                    return Ok(Resolved::Nameserver(ns.clone()));
                }
            }

            // An address in the answer section is terminal.
            if let Some(addr) = first_a(&message.answers) {
                return Ok(Resolved::Address(addr));
            }

            // Glue: the server handed us the next nameserver's address
            // directly, so requery there.
            if let Some(addr) = first_a(&message.additionals) {
                debug!(glue = %addr, "following glue record");
                server = addr;
                continue;
            }

            // Referral without glue: the nameserver is named but not
            // addressed, so resolve it with a fresh nested walk.
            if let Some(ns) = first_ns(&message.authorities) {
                debug!(%ns, "resolving referral nameserver");
                match self.resolve_at_depth(ns, RecordType::A, depth + 1).await? {
                    Resolved::Address(addr) => {
                        server = addr;
                        continue;
                    }
                    Resolved::Nameserver(_) => {
                        unreachable!("a type A sub-resolution cannot yield a nameserver")
                    }
                }
            }

            // No answer and nothing to follow.
            return Err(ResolveError::NoPath);
        }

        Err(ResolveError::HopLimit)
    }

    fn next_id(&self) -> u16 {
        self.ids.lock().unwrap().gen()
    }
}

fn first_a(records: &[Record]) -> Option<Ipv4Addr> {
    records.iter().find_map(|record| match record.data {
        RecordData::A(addr) => Some(addr),
        _ => None,
    })
}

fn first_ns(records: &[Record]) -> Option<&Name> {
    records.iter().find_map(|record| match &record.data {
        RecordData::Ns(name) => Some(name),
        _ => None,
    })
}
