// Search-as-you-type: a generic debounced lookup and the company picker
// built on top of it.

pub mod company_picker;
pub mod debounce;

pub use company_picker::{CompanyPicker, PendingSelection, PickerState};
pub use debounce::{CompanyDirectory, DebouncedLookup, LookupSource, LookupUpdate};
