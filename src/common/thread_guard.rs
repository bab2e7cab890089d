use crate::error::ThreadError;
use serde::Deserialize;
use std::thread::{self, ThreadId};

/// What happens when a guarded object is touched from a foreign thread
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadCheck {
    /// Abort the operation with a panic
    Panic,
    /// Log the violation and carry on
    Log,
}

impl Default for ThreadCheck {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            ThreadCheck::Panic
        } else {
            ThreadCheck::Log
        }
    }
}

/// Remembers the thread that created it and checks later calls against it
#[derive(Clone, Debug)]
pub struct ThreadGuard {
    owner: ThreadId,
    policy: ThreadCheck,
}

impl ThreadGuard {
    /// Binds a new guard to the calling thread
    pub fn new(policy: ThreadCheck) -> Self {
        Self {
            owner: thread::current().id(),
            policy,
        }
    }

    /// The thread this guard is bound to
    pub fn owner(&self) -> ThreadId {
        self.owner
    }

    /// The configured violation policy
    pub fn policy(&self) -> ThreadCheck {
        self.policy
    }

    /// Returns true when called on the owner thread
    pub fn is_owner(&self) -> bool {
        thread::current().id() == self.owner
    }

    /// Checks the calling thread without applying the policy
    pub fn check(&self) -> Result<(), ThreadError> {
        let current = thread::current().id();
        if current == self.owner {
            Ok(())
        } else {
            Err(ThreadError {
                owner: self.owner,
                current,
            })
        }
    }

    /// Checks the calling thread and applies the policy on violation
    ///
    /// # Panics
    ///
    /// Panics on a foreign thread when the policy is [ThreadCheck::Panic]
    #[track_caller]
    pub fn assert(&self) {
        let err = match self.check() {
            Ok(()) => return,
            Err(err) => err,
        };
        match self.policy {
            ThreadCheck::Panic => panic!("{}", err),
            ThreadCheck::Log => {
                tracing::error!(owner = ?err.owner, current = ?err.current, "{}", err)
            }
        }
    }
}
