pub const WINDOW_SIZE: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeShortcut {
    pub page: u32,
    pub ellipsis: bool,
}

/// The page buttons shown around the current page, plus jump-to-first and
/// jump-to-last shortcuts when the window does not reach the edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationWindow {
    pub current_page: u32,
    pub total_pages: u32,
    pub pages: Vec<u32>,
    pub first: Option<EdgeShortcut>,
    pub last: Option<EdgeShortcut>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Previous { target: u32, enabled: bool },
    Page { number: u32, active: bool },
    Ellipsis,
    Next { target: u32, enabled: bool },
}

/// `None` when there is nothing to paginate.
pub fn pagination_window(current_page: u32, total_pages: u32) -> Option<PaginationWindow> {
    if total_pages <= 1 {
        return None;
    }
    let current = current_page.clamp(1, total_pages);

    let start = current.saturating_sub(WINDOW_SIZE / 2).max(1);
    let end = start.saturating_add(WINDOW_SIZE - 1).min(total_pages);
    let start = end.saturating_sub(WINDOW_SIZE - 1).max(1);

    let first = (current > 3 && total_pages > WINDOW_SIZE).then_some(EdgeShortcut {
        page: 1,
        ellipsis: current > 4,
    });
    let last = (total_pages > WINDOW_SIZE && current.saturating_add(2) < total_pages).then_some(
        EdgeShortcut {
            page: total_pages,
            ellipsis: current.saturating_add(3) < total_pages,
        },
    );

    Some(PaginationWindow {
        current_page: current,
        total_pages,
        pages: (start..=end).collect(),
        first,
        last,
    })
}

impl PaginationWindow {
    pub fn controls(&self) -> Vec<PageControl> {
        let mut controls = Vec::with_capacity(self.pages.len() + 6);
        controls.push(PageControl::Previous {
            target: self.current_page.saturating_sub(1).max(1),
            enabled: self.current_page > 1,
        });

        if let Some(first) = self.first {
            controls.push(PageControl::Page {
                number: first.page,
                active: false,
            });
            if first.ellipsis {
                controls.push(PageControl::Ellipsis);
            }
        }

        controls.extend(self.pages.iter().map(|&number| PageControl::Page {
            number,
            active: number == self.current_page,
        }));

        if let Some(last) = self.last {
            if last.ellipsis {
                controls.push(PageControl::Ellipsis);
            }
            controls.push(PageControl::Page {
                number: last.page,
                active: false,
            });
        }

        controls.push(PageControl::Next {
            target: self.current_page.saturating_add(1).min(self.total_pages),
            enabled: self.current_page < self.total_pages,
        });
        controls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_to_paginate() {
        for current in 0..4 {
            assert_eq!(pagination_window(current, 0), None);
            assert_eq!(pagination_window(current, 1), None);
        }
    }

    #[test]
    fn full_window_stays_in_bounds() {
        for total in 6..40 {
            for current in 1..=total {
                let window = pagination_window(current, total).unwrap();
                assert_eq!(window.pages.len(), WINDOW_SIZE as usize, "{current}/{total}");
                assert!(window.pages.windows(2).all(|w| w[1] == w[0] + 1));
                assert!(window.pages.contains(&current));
                assert!(window.pages[0] >= 1);
                assert!(*window.pages.last().unwrap() <= total);
            }
        }
    }

    #[test]
    fn short_listings_show_every_page() {
        let window = pagination_window(2, 3).unwrap();
        assert_eq!(window.pages, vec![1, 2, 3]);
        assert_eq!(window.first, None);
        assert_eq!(window.last, None);
    }

    #[test]
    fn near_the_end() {
        let window = pagination_window(8, 10).unwrap();
        assert_eq!(window.pages, vec![6, 7, 8, 9, 10]);
        assert_eq!(
            window.first,
            Some(EdgeShortcut {
                page: 1,
                ellipsis: true
            })
        );
        assert_eq!(window.last, None);
    }

    #[test]
    fn near_the_start() {
        let window = pagination_window(1, 10).unwrap();
        assert_eq!(window.pages, vec![1, 2, 3, 4, 5]);
        assert_eq!(window.first, None);
        assert_eq!(
            window.last,
            Some(EdgeShortcut {
                page: 10,
                ellipsis: true
            })
        );
    }

    #[test]
    fn shortcut_without_ellipsis_when_adjacent() {
        let window = pagination_window(4, 7).unwrap();
        assert_eq!(window.pages, vec![2, 3, 4, 5, 6]);
        assert_eq!(
            window.first,
            Some(EdgeShortcut {
                page: 1,
                ellipsis: false
            })
        );
        assert_eq!(
            window.last,
            Some(EdgeShortcut {
                page: 7,
                ellipsis: false
            })
        );
    }

    #[test]
    fn out_of_range_current_is_clamped() {
        let window = pagination_window(99, 10).unwrap();
        assert_eq!(window.current_page, 10);
        assert_eq!(window.pages, vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn controls_order_and_edges() {
        let controls = pagination_window(5, 20).unwrap().controls();
        assert_eq!(
            controls,
            vec![
                PageControl::Previous {
                    target: 4,
                    enabled: true
                },
                PageControl::Page {
                    number: 1,
                    active: false
                },
                PageControl::Ellipsis,
                PageControl::Page {
                    number: 3,
                    active: false
                },
                PageControl::Page {
                    number: 4,
                    active: false
                },
                PageControl::Page {
                    number: 5,
                    active: true
                },
                PageControl::Page {
                    number: 6,
                    active: false
                },
                PageControl::Page {
                    number: 7,
                    active: false
                },
                PageControl::Ellipsis,
                PageControl::Page {
                    number: 20,
                    active: false
                },
                PageControl::Next {
                    target: 6,
                    enabled: true
                },
            ]
        );

        let first_page = pagination_window(1, 2).unwrap().controls();
        assert_eq!(
            first_page.first(),
            Some(&PageControl::Previous {
                target: 1,
                enabled: false
            })
        );
        let last_page = pagination_window(2, 2).unwrap().controls();
        assert_eq!(
            last_page.last(),
            Some(&PageControl::Next {
                target: 2,
                enabled: false
            })
        );
    }

    #[test]
    fn huge_page_counts_stay_in_range() {
        let window = pagination_window(u32::MAX, u32::MAX).unwrap();
        assert_eq!(window.pages, ((u32::MAX - 4)..=u32::MAX).collect::<Vec<_>>());
        assert_eq!(
            window.first,
            Some(EdgeShortcut {
                page: 1,
                ellipsis: true
            })
        );
        assert_eq!(window.last, None);

        let controls = window.controls();
        assert_eq!(
            controls.last(),
            Some(&PageControl::Next {
                target: u32::MAX,
                enabled: false
            })
        );

        let window = pagination_window(u32::MAX - 3, u32::MAX).unwrap();
        assert_eq!(
            window.last,
            Some(EdgeShortcut {
                page: u32::MAX,
                ellipsis: false
            })
        );
    }
}
