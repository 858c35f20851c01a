use std::time::Duration;

use crate::errors::AppError;
use crate::models::Testimonial;

/// Rotation over the testimonial list. Auto-advances on a fixed interval until
/// the visitor navigates by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    index: usize,
    auto_playing: bool,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            index: 0,
            auto_playing: true,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn auto_playing(&self) -> bool {
        self.auto_playing
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.auto_playing = false;
    }

    pub fn previous(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.auto_playing = false;
    }

    pub fn go_to(&mut self, index: usize) -> Result<(), AppError> {
        if index >= self.len {
            return Err(AppError::NotFound(format!("testimonial {index}")));
        }
        self.index = index;
        self.auto_playing = false;
        Ok(())
    }

    /// Where an auto-playing carousel that started at slide 0 is after `elapsed`.
    pub fn position_at(&self, elapsed: Duration, interval: Duration) -> usize {
        if !self.auto_playing {
            return self.index;
        }
        if self.len == 0 || interval.is_zero() {
            return 0;
        }
        let ticks = elapsed.as_millis() / interval.as_millis().max(1);
        (ticks % self.len as u128) as usize
    }
}

pub fn average_rating(testimonials: &[Testimonial]) -> Option<f64> {
    if testimonials.is_empty() {
        return None;
    }
    let total: u32 = testimonials.iter().map(|t| u32::from(t.rating)).sum();
    Some(f64::from(total) / testimonials.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Catalog;

    #[test]
    fn test_next_and_previous_wrap() {
        let mut carousel = Carousel::new(3);
        carousel.previous();
        assert_eq!(carousel.index(), 2);
        carousel.next();
        assert_eq!(carousel.index(), 0);
        carousel.next();
        carousel.next();
        carousel.next();
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn test_manual_navigation_stops_autoplay() {
        let mut carousel = Carousel::new(6);
        assert!(carousel.auto_playing());
        carousel.go_to(4).unwrap();
        assert!(!carousel.auto_playing());
        assert_eq!(
            carousel.position_at(Duration::from_secs(60), Duration::from_secs(5)),
            4
        );
    }

    #[test]
    fn test_go_to_out_of_range() {
        let mut carousel = Carousel::new(2);
        assert!(carousel.go_to(2).is_err());
        assert_eq!(carousel.index(), 0);
        assert!(carousel.auto_playing());
    }

    #[test]
    fn test_position_at() {
        let carousel = Carousel::new(6);
        let every = Duration::from_secs(5);
        assert_eq!(carousel.position_at(Duration::from_secs(0), every), 0);
        assert_eq!(carousel.position_at(Duration::from_secs(4), every), 0);
        assert_eq!(carousel.position_at(Duration::from_secs(5), every), 1);
        assert_eq!(carousel.position_at(Duration::from_secs(31), every), 0);
    }

    #[test]
    fn test_empty_carousel() {
        let mut carousel = Carousel::new(0);
        carousel.next();
        carousel.previous();
        assert_eq!(carousel.index(), 0);
        assert_eq!(
            carousel.position_at(Duration::from_secs(10), Duration::from_secs(5)),
            0
        );
    }

    #[test]
    fn test_average_rating() {
        let catalog = Catalog::builtin().unwrap();
        let avg = average_rating(catalog.testimonials()).unwrap();
        assert!((avg - 29.0 / 6.0).abs() < f64::EPSILON);
        assert_eq!(average_rating(&[]), None);
    }
}
