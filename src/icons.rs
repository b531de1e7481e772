// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Icon asset lookup by icon and theme.

use crate::models::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconId {
    Wifi,
    Sockets,
    Pets,
    Terrace,
    Vegan,
    Parking,
    Heart,
    HeartFilled,
    Star,
    Location,
    Clock,
    CheckIn,
}

impl IconId {
    /// Icon for an amenity tag key, if it has one.
    pub fn for_tag_key(key: &str) -> Option<Self> {
        match key {
            "freeWifi" => Some(IconId::Wifi),
            "sockets" => Some(IconId::Sockets),
            "petFriendly" => Some(IconId::Pets),
            "terrace" => Some(IconId::Terrace),
            "veganOptions" => Some(IconId::Vegan),
            "parking" => Some(IconId::Parking),
            _ => None,
        }
    }

    /// Favorite toggle icon for the given state.
    pub fn favorite(is_favorite: bool) -> Self {
        if is_favorite {
            IconId::HeartFilled
        } else {
            IconId::Heart
        }
    }

    /// Asset path of this icon in `theme`.
    pub fn asset(self, theme: Theme) -> &'static str {
        match (self, theme) {
            (IconId::Wifi, Theme::Light) => "assets/icons/wifi.svg",
            (IconId::Wifi, Theme::Dark) => "assets/icons/wifi-dark.svg",
            (IconId::Sockets, Theme::Light) => "assets/icons/sockets.svg",
            (IconId::Sockets, Theme::Dark) => "assets/icons/sockets-dark.svg",
            (IconId::Pets, Theme::Light) => "assets/icons/pets.svg",
            (IconId::Pets, Theme::Dark) => "assets/icons/pets-dark.svg",
            (IconId::Terrace, Theme::Light) => "assets/icons/terrace.svg",
            (IconId::Terrace, Theme::Dark) => "assets/icons/terrace-dark.svg",
            (IconId::Vegan, Theme::Light) => "assets/icons/vegan.svg",
            (IconId::Vegan, Theme::Dark) => "assets/icons/vegan-dark.svg",
            (IconId::Parking, Theme::Light) => "assets/icons/parking.svg",
            (IconId::Parking, Theme::Dark) => "assets/icons/parking-dark.svg",
            (IconId::Heart, Theme::Light) => "assets/icons/heart.svg",
            (IconId::Heart, Theme::Dark) => "assets/icons/heart-dark.svg",
            // The filled heart is the same accent color in both themes.
            (IconId::HeartFilled, _) => "assets/icons/heart-filled.svg",
            (IconId::Star, _) => "assets/icons/star.svg",
            (IconId::Location, Theme::Light) => "assets/icons/location.svg",
            (IconId::Location, Theme::Dark) => "assets/icons/location-dark.svg",
            (IconId::Clock, Theme::Light) => "assets/icons/clock.svg",
            (IconId::Clock, Theme::Dark) => "assets/icons/clock-dark.svg",
            (IconId::CheckIn, Theme::Light) => "assets/icons/check-in.svg",
            (IconId::CheckIn, Theme::Dark) => "assets/icons/check-in-dark.svg",
        }
    }
}
