//! Loading placeholders for the property list.

use leptos::prelude::*;

/// Number of placeholder cards in [`PropertyListSkeleton`].
pub const SKELETON_CARDS: usize = 3;

#[component]
pub fn PropertyCardSkeleton() -> impl IntoView {
    view! {
        <div class="skeleton-card">
            <div class="skeleton skeleton--line skeleton--w75"></div>
            <div class="skeleton skeleton--line skeleton--w50"></div>
            <div class="skeleton-card__grid">
                <div class="skeleton skeleton--line"></div>
                <div class="skeleton skeleton--line"></div>
            </div>
        </div>
    }
}

#[component]
pub fn PropertyListSkeleton() -> impl IntoView {
    view! {
        <div class="skeleton-list">
            {(0..SKELETON_CARDS).map(|_| view! { <PropertyCardSkeleton/> }).collect_view()}
        </div>
    }
}
