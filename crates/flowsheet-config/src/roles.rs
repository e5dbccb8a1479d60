/// Roles that are always emitted as permission-table columns, in this
/// fixed order. Custom roles discovered in the data are appended after
/// these, sorted alphabetically, so sheets stay diff-friendly.
pub const KNOWN_ROLES: [&str; 6] = [
  "Anonymous",
  "Manager",
  "Owner",
  "Reader",
  "Editor",
  "Contributor",
];

/// Permissions that are listed first in each state's permission table,
/// in this fixed order, when the state manages them at all.
pub const KNOWN_PERMISSIONS: [&str; 3] = [
  "Access contents information",
  "View",
  "Modify portal content",
];
