// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;

use crate::diesel_schema::league_documents;

/// Diesel Queryable struct for stored document rows.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = league_documents)]
pub struct DocumentRow {
    pub document_key: String,
    pub body: String,
    pub version: i64,
    pub updated_at: String,
}
