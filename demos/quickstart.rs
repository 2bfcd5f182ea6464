use zoned_instant::{CalendarOffset, Instant};

fn main() {
    let now = Instant::now_local();
    let today = now.start_of_day();
    let tomorrow = today.add_days(1);
    let next_month = today.add_offset(CalendarOffset::months(1));

    println!("now:        {now}");
    println!("today:      {}", today.format("%A %-d %B %Y"));
    println!("tomorrow:   {}", tomorrow.format("%a %-d %b"));
    println!("next month: {}", next_month.format("%Y-%m-%d"));
    println!("in Tokyo:   {}", now.to_timezone("Asia/Tokyo").format("%H:%M %Z"));
    println!(
        "until midnight: {}",
        tomorrow.duration_since(&now)
    );
}
