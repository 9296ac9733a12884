//! # State Containers
//!
//! Shared values handed to pages explicitly instead of being looked up by type.
//!
//! - [`Container`] is a cloneable handle to one value, every clone sees the same cell
//! - [`SessionScope`] provides the containers living as long as a browser session
//! - [`FormScope`] provides the containers living as long as one form, created from a session
//!
//! Creating a form scope always creates fresh form level containers, so a nested form never
//! observes the checkbox of the form around it. Session level containers are shared.
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use common::{AddressLocation, Locale, RawAddress};
use parking_lot::RwLock;

pub struct Container<T> {
    cell: Arc<RwLock<T>>,
}

impl<T> Clone for Container<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T: Default> Default for Container<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Container<T> {
    pub fn new(value: T) -> Self {
        Self {
            cell: Arc::new(RwLock::new(value)),
        }
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.cell.read().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.read())
    }

    pub fn set(&self, value: T) {
        *self.cell.write() = value;
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.cell.write());
    }

    pub fn reset(&self)
    where
        T: Default,
    {
        self.set(T::default());
    }

    /// Whether both handles point at the same value.
    pub fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressState {
    pub id: Option<String>,
    pub usps_address: Option<String>,
    pub raw: RawAddress,
    pub locale: Option<Locale>,
}

/// Borrowed view of an address the backend has already located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAddress<'a> {
    pub id: &'a str,
    pub usps_address: &'a str,
    pub locale: Option<&'a Locale>,
}

impl AddressState {
    pub fn located(raw: RawAddress, location: AddressLocation) -> Self {
        Self {
            id: Some(location.id),
            usps_address: Some(location.usps_address),
            raw,
            locale: Some(location.locale),
        }
    }

    pub fn resolved(&self) -> Option<ResolvedAddress<'_>> {
        Some(ResolvedAddress {
            id: self.id.as_deref()?,
            usps_address: self.usps_address.as_deref()?,
            locale: self.locale.as_ref(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckboxState {
    pub checked: bool,
}

impl CheckboxState {
    pub fn toggle(&mut self) {
        self.checked = !self.checked;
    }
}

/// Containers of one browser session.
#[derive(Clone, Default)]
pub struct SessionScope {
    address: Container<AddressState>,
    submitting: Arc<AtomicBool>,
}

impl SessionScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(&self) -> &Container<AddressState> {
        &self.address
    }

    pub fn form_scope(&self) -> FormScope {
        FormScope {
            address: self.address.clone(),
            checkbox: Container::default(),
        }
    }

    /// Marks a submission as in flight, `None` if one already is.
    pub fn begin_submission(&self) -> Option<SubmissionGuard> {
        self.submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmissionGuard {
                flag: Arc::clone(&self.submitting),
            })
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }
}

/// Clears the in flight mark when dropped.
pub struct SubmissionGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Containers of one form.
#[derive(Clone)]
pub struct FormScope {
    address: Container<AddressState>,
    checkbox: Container<CheckboxState>,
}

impl FormScope {
    pub fn address(&self) -> &Container<AddressState> {
        &self.address
    }

    pub fn checkbox(&self) -> &Container<CheckboxState> {
        &self.checkbox
    }

    pub fn nested(&self) -> FormScope {
        FormScope {
            address: self.address.clone(),
            checkbox: Container::default(),
        }
    }
}
