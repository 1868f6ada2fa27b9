#![allow(dead_code)]  // each test binary uses a different subset of this

//! A scripted stand-in for the UDP transport.
//!
//! A script is a fixed sequence of observations — reply with these
//! attributes, or let the deadline pass — consumed one per receive. Replies
//! echo the transaction ID of the most recent request, the way a real
//! server would, so the tests don’t need to predict the engine’s random
//! IDs. Every datagram the engine sends is recorded for the tests to
//! dissect afterwards.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::time::Duration;

use stun::{Message, MessageType, TransactionId};
use stun::attribute::*;
use stun_discovery::{Error, Transport};


/// What the scripted server does about the engine’s next wait.
pub enum Step {

    /// A Binding Response carrying these attributes.
    Reply(Vec<Attribute>),

    /// A Binding Error Response carrying these attributes.
    ErrorReply(Vec<Attribute>),

    /// A Binding Response whose transaction ID has one bit flipped.
    ReplyWithMangledId(Vec<Attribute>),

    /// No datagram before the deadline.
    Timeout,
}


pub struct ScriptedTransport {
    local: SocketAddr,
    script: RefCell<VecDeque<Step>>,
    sent: RefCell<Vec<(Vec<u8>, SocketAddr)>>,
}

impl ScriptedTransport {
    pub fn new(local: &str, script: Vec<Step>) -> Self {
        Self {
            local: local.parse().unwrap(),
            script: RefCell::new(script.into()),
            sent: RefCell::new(Vec::new()),
        }
    }

    /// The requests the engine sent, re-parsed, with their destinations.
    pub fn requests(&self) -> Vec<(Message, SocketAddr)> {
        self.sent.borrow().iter()
            .map(|(bytes, to)| (Message::from_bytes(bytes).unwrap(), *to))
            .collect()
    }
}

impl Transport for ScriptedTransport {
    fn send_to(&self, bytes: &[u8], remote: SocketAddr) -> Result<(), Error> {
        self.sent.borrow_mut().push((bytes.to_vec(), remote));
        Ok(())
    }

    fn receive(&self, _timeout: Duration) -> Result<Option<Vec<u8>>, Error> {
        let step = self.script.borrow_mut().pop_front()
            .expect("the engine waited for more observations than were scripted");

        let (bytes, _) = self.sent.borrow().last()
            .expect("the engine waited before sending anything")
            .clone();
        let request = Message::from_bytes(&bytes)
            .expect("the engine sent an unparseable request");

        Ok(match step {
            Step::Reply(attributes) => {
                Some(respond(MessageType::BindingResponse, request.transaction_id, attributes))
            }
            Step::ErrorReply(attributes) => {
                Some(respond(MessageType::BindingErrorResponse, request.transaction_id, attributes))
            }
            Step::ReplyWithMangledId(attributes) => {
                let mut transaction_id = request.transaction_id;
                transaction_id.0[15] ^= 0b_0000_0001;
                Some(respond(MessageType::BindingResponse, transaction_id, attributes))
            }
            Step::Timeout => {
                None
            }
        })
    }

    fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(self.local)
    }
}

fn respond(message_type: MessageType, transaction_id: TransactionId, attributes: Vec<Attribute>) -> Vec<u8> {
    let message = Message { message_type, transaction_id, attributes };
    message.to_bytes().unwrap()
}


// attribute builders

pub fn mapped(endpoint: &str) -> Attribute {
    Attribute::MappedAddress(MappedAddress { endpoint: endpoint.parse().unwrap() })
}

pub fn changed(endpoint: &str) -> Attribute {
    Attribute::ChangedAddress(ChangedAddress { endpoint: endpoint.parse().unwrap() })
}

pub fn other(endpoint: &str) -> Attribute {
    Attribute::OtherAddress(OtherAddress { endpoint: endpoint.parse().unwrap() })
}

pub fn xor_mapped(endpoint: &str) -> Attribute {
    Attribute::XorMappedAddress(XorMappedAddress { endpoint: endpoint.parse().unwrap() })
}

pub fn error(class: u8, number: u8, phrase: &str) -> Attribute {
    Attribute::ErrorCode(ErrorCode { class, number, phrase: phrase.into() })
}

pub fn change_request(change_ip: bool, change_port: bool) -> Attribute {
    Attribute::ChangeRequest(ChangeRequest { change_ip, change_port })
}
