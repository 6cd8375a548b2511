// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The club catalogue managers pick their clubs from.

/// Logo files for every club a manager may take charge of.
///
/// The club name is the file name without the `.png` extension.
pub const CLUB_LOGOS: [&str; 20] = [
    "AFC Bournemouth.png",
    "Arsenal FC.png",
    "Aston Villa.png",
    "Brentford FC.png",
    "Brighton & Hove Albion.png",
    "Burnley FC.png",
    "Chelsea FC.png",
    "Crystal Palace.png",
    "Everton FC.png",
    "Fulham FC.png",
    "Leeds United.png",
    "Liverpool FC.png",
    "Manchester City.png",
    "Manchester United.png",
    "Newcastle United.png",
    "Nottingham Forest.png",
    "Sunderland AFC.png",
    "Tottenham Hotspur.png",
    "West Ham United.png",
    "Wolverhampton Wanderers.png",
];

const LOGO_EXTENSION: &str = ".png";

/// Derives the club name from a logo file name.
#[must_use]
pub fn club_name_from_logo(logo_file: &str) -> &str {
    logo_file.strip_suffix(LOGO_EXTENSION).unwrap_or(logo_file)
}

/// Builds the logo file name for a club.
#[must_use]
pub fn logo_for_club(club_name: &str) -> String {
    format!("{club_name}{LOGO_EXTENSION}")
}

/// Returns whether the logo file belongs to the catalogue.
#[must_use]
pub fn is_catalogue_logo(logo_file: &str) -> bool {
    CLUB_LOGOS.contains(&logo_file)
}

/// Lists the catalogue as club names.
pub fn club_names() -> impl Iterator<Item = &'static str> {
    CLUB_LOGOS.iter().map(|logo| club_name_from_logo(logo))
}
