//! Storage of named roll commands per owner.

use std::collections::HashMap;

use tracing::debug;

use crate::{command::RollCommand, error::Error};

/// Identifies who a saved roll belongs to: a user within a specific chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_structs, reason = "A saved roll is always scoped to a user and a chat")]
pub struct Owner {
	/// User ID
	pub user: i64,

	/// Chat ID
	pub chat: i64,
}

/// Stores roll command arguments under a name, per [`Owner`].
///
/// Arguments are validated when saved, so anything that comes back out of [`SavedRolls::get()`] parses.
pub trait SavedRolls {
	/// Saves a roll command's arguments under a name, replacing any existing roll with that name.
	///
	/// # Errors
	/// If the arguments don't form a valid [`RollCommand`], the error from parsing them is returned and nothing is
	/// saved.
	fn save(&mut self, owner: Owner, name: &str, args: Vec<String>) -> Result<(), Error>;

	/// Gets the arguments of a saved roll.
	///
	/// # Errors
	/// If there is no roll with the name for the owner, an [`Error::DoesNotExist`] is returned.
	fn get(&self, owner: Owner, name: &str) -> Result<Vec<String>, Error>;

	/// Deletes a saved roll.
	///
	/// # Errors
	/// If there is no roll with the name for the owner, an [`Error::DoesNotExist`] is returned.
	fn delete(&mut self, owner: Owner, name: &str) -> Result<(), Error>;
}

/// Keeps saved rolls in memory for the life of the process.
///
/// # Examples
/// ```
/// use rollbot::{store::{MemoryStore, Owner, SavedRolls}, Error};
///
/// let owner = Owner { user: 1, chat: 10 };
/// let mut store = MemoryStore::default();
/// store.save(owner, "attack", vec!["1d20+5".to_owned(), "adv".to_owned()])?;
/// assert_eq!(store.get(owner, "attack")?, ["1d20+5", "adv"]);
///
/// store.delete(owner, "attack")?;
/// assert!(matches!(store.get(owner, "attack"), Err(Error::DoesNotExist { .. })));
/// # Ok::<(), rollbot::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
	/// Saved arguments by owner and name
	rolls: HashMap<(Owner, String), Vec<String>>,
}

impl MemoryStore {
	/// Number of saved rolls across all owners
	#[must_use]
	#[inline]
	pub fn len(&self) -> usize {
		self.rolls.len()
	}

	/// Indicates whether there are no saved rolls at all.
	#[must_use]
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.rolls.is_empty()
	}
}

impl SavedRolls for MemoryStore {
	fn save(&mut self, owner: Owner, name: &str, args: Vec<String>) -> Result<(), Error> {
		RollCommand::from_args(&args)?;
		debug!(user = owner.user, chat = owner.chat, name, "saving roll");
		self.rolls.insert((owner, name.to_owned()), args);
		Ok(())
	}

	fn get(&self, owner: Owner, name: &str) -> Result<Vec<String>, Error> {
		self.rolls
			.get(&(owner, name.to_owned()))
			.cloned()
			.ok_or_else(|| Error::DoesNotExist { name: name.to_owned() })
	}

	fn delete(&mut self, owner: Owner, name: &str) -> Result<(), Error> {
		debug!(user = owner.user, chat = owner.chat, name, "deleting roll");
		self.rolls
			.remove(&(owner, name.to_owned()))
			.map(|_| ())
			.ok_or_else(|| Error::DoesNotExist { name: name.to_owned() })
	}
}
